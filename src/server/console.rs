//! The browser console served from the root route. One page: login, the
//! reward tier builder, and read-only browsing of platform data. All logic
//! lives server-side; the page only posts form state and renders snapshots.

pub fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Podium Admin Console</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 960px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 8px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    input { padding: 8px; box-sizing: border-box; }
    button { margin-top: 8px; padding: 8px 14px; }
    table { border-collapse: collapse; width: 100%; margin-top: 8px; }
    td, th { border: 1px solid #ddd; padding: 6px; text-align: left; }
    .err { color: #b00020; font-size: 0.85rem; min-height: 1em; }
    .banner { color: #b00020; font-weight: 600; margin-top: 8px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 120px; }
  </style>
</head>
<body>
  <h1>Podium Admin Console</h1>
  <p>Reward tier builder and platform administration over the local API.</p>

  <div class="card">
    <strong>Login</strong>
    <label for="email">Email</label>
    <input id="email" type="email" style="width:280px" />
    <label for="password">Password</label>
    <input id="password" type="password" style="width:280px" />
    <div><button id="login-btn">POST /api/login</button>
    <button id="logout-btn">POST /api/logout</button></div>
  </div>

  <div class="card">
    <strong>Reward Tier Builder</strong>
    <label for="rt-name">Reward Tier Name</label>
    <input id="rt-name" style="width:280px" />
    <span class="err" id="err-name"></span>
    <label for="rt-players">Total Players</label>
    <input id="rt-players" type="number" min="0" value="100" style="width:120px" />
    <span class="err" id="err-players"></span>
    <label for="rt-amount">Total Amount</label>
    <input id="rt-amount" type="number" min="0" step="0.01" value="1000" style="width:120px" />
    <span class="err" id="err-amount"></span>

    <table id="tier-table">
      <thead>
        <tr><th>Label (e.g., 1 or 3-10)</th><th>Amount per User</th><th>Total</th><th></th></tr>
      </thead>
      <tbody></tbody>
    </table>
    <button id="add-tier-btn">Add Tier</button>
    <p id="distributed">Overall Distributed: 0.00 / 0.00</p>
    <p class="banner" id="banner"></p>
    <div><button id="submit-btn">Submit Reward Tier</button></div>
  </div>

  <div class="card">
    <strong>Browse</strong>
    <div>
      <button data-get="/api/reward-tiers">Reward Tiers</button>
      <button data-get="/api/games?page=1&page_size=10">Games</button>
      <button data-get="/api/categories">Categories</button>
      <button data-get="/api/users?page=1&page_size=10">Users</button>
      <button data-get="/api/health">Health</button>
    </div>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');
    const tbody = document.querySelector('#tier-table tbody');
    let tiers = [];

    function formState() {
      return {
        name: document.getElementById('rt-name').value,
        totalPlayers: document.getElementById('rt-players').value,
        totalAmount: document.getElementById('rt-amount').value,
        tiers: tiers,
      };
    }

    function renderTiers(snapshot) {
      tbody.innerHTML = '';
      tiers.forEach((t, i) => {
        const tr = document.createElement('tr');
        const rowErr = snapshot && snapshot.errors.tiers[i] ? snapshot.errors.tiers[i] : { label: '', amountPerUser: '' };
        tr.innerHTML =
          '<td><input data-label="' + i + '" value="' + t.label.replace(/"/g, '&quot;') + '" />' +
          '<div class="err">' + rowErr.label + '</div></td>' +
          '<td><input type="number" min="0" step="0.01" data-amount="' + i + '" value="' + t.amountPerUser + '" />' +
          '<div class="err">' + rowErr.amountPerUser + '</div></td>' +
          '<td>' + t.totalAmount.toFixed(2) + '</td>' +
          '<td><button data-remove="' + i + '">Remove</button></td>';
        tbody.appendChild(tr);
      });
    }

    async function revalidate() {
      const state = formState();
      const response = await fetch('/api/reward-tiers/validate', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(state),
      });
      if (!response.ok) { return null; }
      const snapshot = await response.json();
      document.getElementById('err-name').textContent = snapshot.errors.name;
      document.getElementById('err-players').textContent = snapshot.errors.totalPlayers;
      document.getElementById('err-amount').textContent = snapshot.errors.totalAmount;
      document.getElementById('banner').textContent = snapshot.banner;
      const total = Number(state.totalAmount) || 0;
      document.getElementById('distributed').textContent =
        'Overall Distributed: ' + snapshot.distributed.toFixed(2) + ' / ' + total.toFixed(2);
      renderTiers(snapshot);
      return snapshot;
    }

    function effectiveEnd(t) { return t.endRank > 0 ? t.endRank : t.startRank; }
    function parseLabel(label) {
      const parts = label.split('-').map(p => p.trim());
      if (parts.length === 1) {
        const n = parseInt(parts[0], 10);
        return { start: isNaN(n) ? 0 : n, end: 0 };
      }
      const s = parseInt(parts[0], 10);
      const e = parseInt(parts[1], 10);
      return { start: isNaN(s) ? 0 : s, end: isNaN(e) ? 0 : e };
    }
    function tierTotal(t) {
      const amt = parseFloat(t.amountPerUser);
      if (!amt || isNaN(amt)) return 0;
      return Math.max(0, effectiveEnd(t) - t.startRank + 1) * amt;
    }

    document.getElementById('add-tier-btn').addEventListener('click', () => {
      const totalPlayers = parseInt(document.getElementById('rt-players').value, 10) || 0;
      const prev = tiers[tiers.length - 1];
      const start = prev ? effectiveEnd(prev) + 1 : 1;
      const span = prev ? Math.max(1, effectiveEnd(prev) - prev.startRank + 1) : 1;
      const end = Math.min(start + span - 1, totalPlayers);
      if (start <= totalPlayers) {
        tiers.push({
          label: end === start ? String(start) : start + '-' + end,
          startRank: start,
          endRank: end === start ? 0 : end,
          amountPerUser: '',
          totalAmount: 0,
        });
      } else {
        tiers.push({ label: '', startRank: 0, endRank: 0, amountPerUser: '', totalAmount: 0 });
      }
      revalidate();
    });

    tbody.addEventListener('input', (event) => {
      const labelIdx = event.target.dataset.label;
      const amountIdx = event.target.dataset.amount;
      if (labelIdx !== undefined) {
        const t = tiers[Number(labelIdx)];
        const parsed = parseLabel(event.target.value);
        t.label = event.target.value;
        t.startRank = parsed.start;
        t.endRank = parsed.end;
        t.totalAmount = tierTotal(t);
      } else if (amountIdx !== undefined) {
        const t = tiers[Number(amountIdx)];
        t.amountPerUser = event.target.value;
        t.totalAmount = tierTotal(t);
      } else {
        return;
      }
      revalidate();
    });

    tbody.addEventListener('click', (event) => {
      const idx = event.target.dataset.remove;
      if (idx === undefined) return;
      tiers.splice(Number(idx), 1);
      revalidate();
    });

    ['rt-name', 'rt-players', 'rt-amount'].forEach(id => {
      document.getElementById(id).addEventListener('input', revalidate);
    });

    async function request(path, options) {
      output.textContent = 'Loading…';
      const response = await fetch(path, options);
      const text = await response.text();
      output.textContent = 'HTTP ' + response.status + '\n' + text;
      return response;
    }

    document.getElementById('submit-btn').addEventListener('click', async () => {
      const btn = document.getElementById('submit-btn');
      btn.disabled = true;
      try {
        await request('/api/reward-tiers', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(formState()),
        });
      } finally {
        btn.disabled = false;
      }
    });

    document.getElementById('login-btn').addEventListener('click', () => {
      request('/api/login', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({
          email: document.getElementById('email').value,
          password: document.getElementById('password').value,
        }),
      });
    });

    document.getElementById('logout-btn').addEventListener('click', () => {
      request('/api/logout', { method: 'POST' });
    });

    document.querySelectorAll('[data-get]').forEach(btn => {
      btn.addEventListener('click', () => request(btn.dataset.get, { method: 'GET' }));
    });
  </script>
</body>
</html>
"#
    .to_string()
}
