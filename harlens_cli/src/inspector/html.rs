//! Embedded HTML dashboard for the inspector

pub const INSPECTOR_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Harlens Inspector</title>
    <style>
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #fafafa;
            color: #333;
            min-height: 100vh;
            font-size: 14px;
        }

        /* Header */
        header {
            background: #fff;
            border-bottom: 1px solid #e0e0e0;
            padding: 0.75rem 1rem;
            display: flex;
            align-items: center;
            gap: 1rem;
            position: sticky;
            top: 0;
            z-index: 100;
        }
        h1 { font-size: 1.1rem; font-weight: 600; color: #333; }
        .trace-name { color: #888; font-family: monospace; }
        .filter-input {
            width: 400px;
            padding: 0.35rem 0.5rem;
            border: 1px solid #d0d0d0;
            border-radius: 3px;
            font-size: 0.9rem;
        }

        /* Layout */
        .inspect-container { display: flex; height: calc(100vh - 52px); }
        .entry-list-panel { flex: 3; overflow-y: auto; border-right: 1px solid #e0e0e0; }
        .detail-panel { flex: 2; overflow-y: auto; padding: 1rem; background: #fff; }
        .detail-panel pre { white-space: pre-wrap; word-break: break-all; font-size: 0.8rem; }
        .detail-empty { color: #999; text-align: center; margin-top: 3rem; }

        /* Table */
        table { width: 100%; border-collapse: collapse; font-family: monospace; font-size: 0.85rem; }
        th { text-align: left; color: #888; font-weight: 500; padding: 0.4rem 0.5rem; border-bottom: 1px solid #e0e0e0; }
        td { padding: 0.25rem 0.5rem; white-space: nowrap; }
        tbody tr:nth-child(even) { background: #f3f6fb; }
        tbody tr { cursor: pointer; }
        tbody tr:hover, tbody tr.selected { background: #e4ecf7; }
        td.url { max-width: 700px; overflow: hidden; text-overflow: ellipsis; }
        td.url.child { padding-left: 2rem; }
        .severity-warning { color: #c25e00; }
        .severity-error { color: #a4262c; }
        .error-banner { padding: 1rem; color: #a4262c; background: #fde7e9; display: none; }
    </style>
</head>
<body>
    <header>
        <h1>Harlens Inspector</h1>
        <span class="trace-name" id="trace-name"></span>
        <input type="text" class="filter-input" placeholder="Search by URL" id="filter-input" oninput="onSearch()">
        <span id="entry-count"></span>
    </header>

    <div class="inspect-container">
        <div class="entry-list-panel">
            <div class="error-banner" id="error-banner"></div>
            <table>
                <thead>
                    <tr><th>Method</th><th>URL</th><th>Status</th><th>Duration</th></tr>
                </thead>
                <tbody id="entry-list"></tbody>
            </table>
        </div>
        <div class="detail-panel" id="detail-panel">
            <div class="detail-empty" id="detail-empty">Select an entry to see its details</div>
            <pre id="detail" hidden></pre>
        </div>
    </div>

    <script>
        let searchText = '';
        let pending = null;
        // Search the visible rows were fetched with; row indexes refer to it
        let renderedSearch = '';
        let entriesSeq = 0;
        let detailSeq = 0;

        function escapeHtml(text) {
            const div = document.createElement('div');
            div.textContent = text;
            return div.innerHTML;
        }

        async function fetchInfo() {
            try {
                const res = await fetch('/api/info');
                const info = await res.json();
                document.getElementById('trace-name').textContent = info.source;
            } catch (e) { console.error('Failed to fetch info:', e); }
        }

        async function fetchEntries() {
            const banner = document.getElementById('error-banner');
            const list = document.getElementById('entry-list');
            const seq = ++entriesSeq;
            const search = searchText;
            const res = await fetch('/api/entries?search=' + encodeURIComponent(search));
            const body = await res.json();
            if (seq !== entriesSeq) return;
            renderedSearch = search;
            detailSeq++;

            if (!res.ok) {
                banner.textContent = body.error;
                banner.style.display = 'block';
                list.innerHTML = '';
                document.getElementById('entry-count').textContent = '';
                return;
            }

            banner.style.display = 'none';
            document.getElementById('entry-count').textContent = body.length + ' entries';
            list.innerHTML = body.map(row => `
                <tr class="severity-${row.severity}" onclick="showEntry(${row.index}, this)">
                    <td>${escapeHtml(row.request.method)}</td>
                    <td class="url${row.isBatchChildEntry ? ' child' : ''}">${row.isBatchChildEntry ? '- ' : ''}${escapeHtml(row.displayUrl)}</td>
                    <td>${row.response.status}</td>
                    <td>${Math.round(row.time)}</td>
                </tr>`).join('');
            document.getElementById('detail').hidden = true;
            document.getElementById('detail-empty').hidden = false;
        }

        async function showEntry(index, rowEl) {
            document.querySelectorAll('tbody tr.selected').forEach(r => r.classList.remove('selected'));
            rowEl.classList.add('selected');

            const seq = ++detailSeq;
            const res = await fetch(`/api/entries/${index}?search=` + encodeURIComponent(renderedSearch));
            if (!res.ok || seq !== detailSeq) return;
            const entry = await res.json();
            if (seq !== detailSeq) return;

            const detail = document.getElementById('detail');
            detail.textContent = JSON.stringify(entry, null, 2);
            detail.hidden = false;
            document.getElementById('detail-empty').hidden = true;
        }

        function onSearch() {
            searchText = document.getElementById('filter-input').value;
            clearTimeout(pending);
            pending = setTimeout(fetchEntries, 100);
        }

        fetchInfo();
        fetchEntries();
    </script>
</body>
</html>
"#;
