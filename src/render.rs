//! This module renders the collected progress entries as a self-contained
//! HTML fragment. The fragment carries its own styling and a script that,
//! on a button click, animates every book's bar from its start-of-day to
//! its end-of-day percentage. Rendering is pure templating over the entry
//! sequence; the only validation happened in the collector.

use std::io::{Write, BufWriter};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json;

use book::ProgressEntry;
use super::errors::*;

/// The bar transition and readout interpolation time, in milliseconds.
const ANIMATION_MS: u64 = 2000;
/// The per-entry animation start offset, in milliseconds. Entry `i` starts
/// at `i * STAGGER_MS + STAGGER_LEAD_MS`.
const STAGGER_MS: u64 = 200;
const STAGGER_LEAD_MS: u64 = 50;

/// Escapes text for interpolation into HTML text and attribute positions.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes the entry sequence for the embedded script payload.
///
/// `</` is escaped so that no title can terminate the surrounding
/// `<script>` element from inside a JSON string.
fn payload(entries: &[ProgressEntry]) -> Result<String> {
    let json = serde_json::to_string(entries)
        .chain_err(|| ErrorKind::Json("could not serialize progress entries".into()))?;
    Ok(json.replace("</", "<\\/"))
}

/// Returns a container id unique to this run.
fn unique_id() -> String {
    let millis = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() * 1000 + d.subsec_millis() as u64,
        // A pre-epoch clock only costs us id uniqueness, not correctness.
        Err(_) => 0,
    };
    format!("book-progress-{}", millis)
}

/// Renders one book card: cover, title, author, and the bar initialized
/// to the start-of-day percentage.
fn card(entry: &ProgressEntry, id: &str, index: usize) -> String {
    format!(
        r#"
    <div style="
      display: flex;
      align-items: center;
      background: white;
      border-radius: 12px;
      padding: 20px;
      box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
      border: 1px solid #e1e5e9;
    ">
      <div style="
        width: 80px;
        height: 120px;
        margin-right: 20px;
        border-radius: 8px;
        overflow: hidden;
        box-shadow: 0 2px 8px rgba(0, 0, 0, 0.15);
      ">
        <img src="{cover}" alt="{title}" style="
          width: 100%;
          height: 100%;
          object-fit: cover;
        ">
      </div>

      <div style="flex: 1;">
        <h3 style="margin: 0 0 8px 0; color: #2c3e50; font-size: 18px;">{title}</h3>
        <p style="margin: 0 0 15px 0; color: #7f8c8d; font-size: 14px;">by {author}</p>

        <div style="margin-bottom: 8px;">
          <div style="
            width: 100%;
            height: 20px;
            background: #ecf0f1;
            border-radius: 10px;
            overflow: hidden;
            position: relative;
          ">
            <div id="progress-bar-{id}-{index}" style="
              height: 100%;
              background: linear-gradient(90deg, #3498db, #2ecc71);
              border-radius: 10px;
              width: {start}%;
              transition: width 2s ease-in-out;
              position: relative;
            "></div>
            <div style="
              position: absolute;
              left: 50%;
              top: 50%;
              transform: translate(-50%, -50%);
              color: #2c3e50;
              font-size: 12px;
              font-weight: bold;
              pointer-events: none;
            " id="progress-text-{id}-{index}">
              {start}%
            </div>
          </div>
        </div>

      </div>
    </div>
"#,
        cover = escape(entry.book().cover()),
        title = escape(entry.book().title()),
        author = escape(entry.book().author()),
        id = id,
        index = index,
        start = entry.start_progress()
    )
}

/// The client-side animation: reset every bar to its start percentage,
/// then transition to the end percentage with a per-entry stagger while
/// a readout interpolates and rounds to the nearest integer. The trigger
/// button is disabled and relabeled for the duration.
fn script(entries: &[ProgressEntry], id: &str) -> Result<String> {
    Ok(format!(
        r#"
  <script>
    document.getElementById('animate-{id}').addEventListener('click', function() {{
      const button = this;
      button.disabled = true;
      button.textContent = '⏳ Animating...';

      const progressData = {payload};

      progressData.forEach((book, index) => {{
        const progressBar = document.getElementById('progress-bar-{id}-' + index);
        const progressText = document.getElementById('progress-text-{id}-' + index);

        // Reset to start position first
        progressBar.style.transition = 'none';
        progressBar.style.width = book.startProgress + '%';
        progressText.textContent = book.startProgress + '%';

        setTimeout(() => {{
          // Re-enable transition and animate
          progressBar.style.transition = 'width 2s ease-in-out';
          progressBar.style.width = book.endProgress + '%';

          const startProgress = book.startProgress;
          const endProgress = book.endProgress;
          const duration = {duration};
          const startTime = Date.now();

          function updateText() {{
            const elapsed = Date.now() - startTime;
            const progress = Math.min(elapsed / duration, 1);
            const currentProgress = startProgress + (endProgress - startProgress) * progress;

            progressText.textContent = Math.round(currentProgress) + '%';

            if (progress < 1) {{
              requestAnimationFrame(updateText);
            }}
          }}

          updateText();
        }}, index * {stagger} + {lead});
      }});

      setTimeout(() => {{
        button.disabled = false;
        button.textContent = '🔄 Animate Again';
      }}, {restore});
    }});
  </script>"#,
        id = id,
        payload = payload(entries)?,
        duration = ANIMATION_MS,
        stagger = STAGGER_MS,
        lead = STAGGER_LEAD_MS,
        restore = ANIMATION_MS + entries.len() as u64 * STAGGER_MS
    ))
}

/// Renders the fragment for the given entries with the given container id.
fn fragment_with_id(entries: &[ProgressEntry], id: &str) -> Result<String> {
    let mut s = format!(
        r#"<div id="{id}" style="font-family: Arial, sans-serif; max-width: 800px; margin: 20px auto; padding: 20px;">
  <h2 style="text-align: center; color: #333; margin-bottom: 30px;">📚 Book Reading Progress</h2>

  <div style="margin-bottom: 20px; text-align: center;">
    <button id="animate-{id}" style="
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      color: white;
      border: none;
      padding: 12px 24px;
      border-radius: 8px;
      cursor: pointer;
      font-size: 16px;
      font-weight: bold;
      transition: transform 0.2s;
    " onmouseover="this.style.transform='scale(1.05)'" onmouseout="this.style.transform='scale(1)'">
      ▶️ Animate Progress
    </button>
  </div>

  <div style="display: grid; gap: 20px;">"#,
        id = id
    );

    for (index, entry) in entries.iter().enumerate() {
        s.push_str(&card(entry, id, index));
    }

    s.push_str("\n  </div>\n");
    s.push_str(&script(entries, id)?);
    s.push_str("\n</div>");

    Ok(s)
}

/// Renders the full fragment for the given entries as a string.
///
/// The container id is derived from the current time, so two runs embed
/// fragments that can coexist on one page. Rendering is otherwise a pure
/// function of the entry sequence.
pub fn fragment(entries: &[ProgressEntry]) -> Result<String> {
    fragment_with_id(entries, &unique_id())
}

/// Renders the fragment and writes it to the given writer.
pub fn render_to<W: Write>(entries: &[ProgressEntry], output: W) -> Result<()> {
    let mut w = BufWriter::new(output);
    w.write_all(fragment(entries)?.as_bytes())
        .chain_err(|| ErrorKind::Io("could not write fragment".into()))?;
    w.flush().chain_err(|| ErrorKind::Io("could not write fragment".into()))
}
