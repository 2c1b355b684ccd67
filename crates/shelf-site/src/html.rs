//! Static HTML pages built with string formatting.
//!
//! Every page is a pure function of its [`ViewModel`] and [`RenderConfig`].
//! Text that comes from a snapshot is escaped before it is placed in markup,
//! and chart payloads travel as one JSON document that the page script hands
//! to Chart.js.

use crate::evolution::Timeline;
use crate::render::{RenderConfig, SiteRenderer};
use shelf_common::{format_timestamp, Result, ShelfError};
use shelf_graphs::{KeyMetric, ViewModel};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Accent colour used when none is configured.
pub const DEFAULT_ACCENT: &str = "#667eea";

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

const STYLESHEET_PATH: &str = "css/style.css";

const CHART_SCRIPT: &str = r##"(function () {
  const data = JSON.parse(document.getElementById('shelf-data').textContent);
  const accent = getComputedStyle(document.documentElement).getPropertyValue('--accent').trim();
  const bar = (id, labels, datasets, stacked) => new Chart(document.getElementById(id), {
    type: 'bar',
    data: { labels: labels, datasets: datasets },
    options: { responsive: true, scales: { x: { stacked: stacked }, y: { stacked: stacked, beginAtZero: true } } },
  });
  const readUnread = (id, series) => bar(id, series.labels, [
    { label: 'Read', data: series.readData, backgroundColor: '#48bb78' },
    { label: 'Unread', data: series.unreadData, backgroundColor: '#f56565' },
  ], true);
  const filter = (selectId, attr, values) => {
    const select = document.getElementById(selectId);
    values.forEach((value) => select.add(new Option(value, value)));
    select.addEventListener('change', () => {
      document.querySelectorAll('[' + attr + ']').forEach((row) => {
        row.hidden = select.value !== '' && row.getAttribute(attr) !== select.value;
      });
    });
  };

  bar('year-chart', data.years.labels, [{ label: 'Articles', data: data.years.data, backgroundColor: accent }], false);
  bar('month-chart', data.months.labels, data.months.datasets, true);
  readUnread('read-unread-month-chart', data.readUnreadByMonth);
  readUnread('read-unread-source-chart', data.readUnreadBySource);
  readUnread('read-unread-year-chart', data.readUnreadByYear);
  new Chart(document.getElementById('age-chart'), {
    type: 'doughnut',
    data: { labels: data.unreadAgeDistribution.labels, datasets: [{ data: data.unreadAgeDistribution.data }] },
  });
  bar('unread-year-chart', data.unreadByYear.labels, [{ label: 'Unread', data: data.unreadByYear.data, backgroundColor: '#f56565' }], false);
  filter('source-filter', 'data-source', data.allSources);
  filter('year-filter', 'data-year', data.allYears);
})();"##;

/// Renders the report site as plain HTML files.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
    accent_color: String,
    timeline: Timeline,
}

impl HtmlRenderer {
    /// Renderer for a site called `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            accent_color: DEFAULT_ACCENT.to_string(),
            timeline: Timeline::default(),
        }
    }

    /// Use `color` (`#rrggbb`) as the accent colour.
    #[must_use]
    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = color.into();
        self
    }

    /// Show `timeline` on the evolution page.
    #[must_use]
    pub fn with_timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = timeline;
        self
    }

    /// Site title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Landing page: headline numbers, badges and the report archive.
    pub fn index_page(&self, view: &ViewModel, config: &RenderConfig) -> String {
        let content = format!(
            r#"<section class="intro">
    <h2>{title}</h2>
    <p>{total} articles tracked across {sources} sources.</p>
    <p><a class="button" href="{base}analytics.html">Open analytics</a></p>
</section>
{key_metrics}
{highlights}
<section>
    <h2>Report history</h2>
    {history}
</section>"#,
            title = html_escape(&self.title),
            total = view.total_articles,
            sources = view.sources.len(),
            base = config.base_url,
            key_metrics = metric_cards("key-metrics", &view.key_metrics),
            highlights = metric_cards("highlights", &view.highlight_metrics),
            history = history_links(config),
        );

        self.build_page(&self.title, view, config, &content)
    }

    /// Charts, tables and the unread backlog of one snapshot.
    pub fn analytics_page(&self, view: &ViewModel, config: &RenderConfig) -> String {
        let mut source_rows = String::new();
        for source in &view.sources {
            let per_author = source
                .per_author()
                .map_or_else(String::new, |value| format!("{value:.1}"));
            let _ = write!(
                source_rows,
                r#"<tr data-source="{name}"><td>{name}</td><td>{count}</td><td>{read}</td><td>{unread}</td><td>{pct:.1}%</td><td>{per_author}</td></tr>"#,
                name = html_escape(&source.name),
                count = source.count,
                read = source.read,
                unread = source.unread,
                pct = source.read_pct,
            );
        }

        let mut year_rows = String::new();
        for year in &view.years {
            let _ = write!(
                year_rows,
                r#"<tr data-year="{year}"><td>{year}</td><td>{count}</td></tr>"#,
                year = html_escape(&year.year),
                count = year.count,
            );
        }

        let mut backlog = String::new();
        if view.top_oldest_unread_articles.is_empty() {
            backlog.push_str(r#"<p class="empty">Nothing unread.</p>"#);
        } else {
            backlog.push_str("<ol>");
            for article in &view.top_oldest_unread_articles {
                let _ = write!(
                    backlog,
                    r#"<li><a href="{link}" target="_blank" rel="noopener">{title}</a> <span class="meta">{date} · {source}</span></li>"#,
                    link = html_escape(&article.link),
                    title = html_escape(&article.title),
                    date = html_escape(&article.date),
                    source = html_escape(&article.category),
                );
            }
            backlog.push_str("</ol>");
        }

        let content = format!(
            r#"{key_metrics}
{highlights}
<section class="charts">
    <div class="chart"><h3>Articles per year</h3><canvas id="year-chart"></canvas></div>
    <div class="chart"><h3>Articles per month by source</h3><canvas id="month-chart"></canvas></div>
    <div class="chart"><h3>Read vs unread by month</h3><canvas id="read-unread-month-chart"></canvas></div>
    <div class="chart"><h3>Read vs unread by source</h3><canvas id="read-unread-source-chart"></canvas></div>
    <div class="chart"><h3>Read vs unread by year</h3><canvas id="read-unread-year-chart"></canvas></div>
    <div class="chart"><h3>Unread article age</h3><canvas id="age-chart"></canvas></div>
    <div class="chart"><h3>Unread by year</h3><canvas id="unread-year-chart"></canvas></div>
</section>
<section>
    <h2>Sources</h2>
    <label>Source <select id="source-filter"><option value="">All</option></select></label>
    <table><thead><tr><th>Source</th><th>Articles</th><th>Read</th><th>Unread</th><th>Read rate</th><th>Per author</th></tr></thead><tbody>{source_rows}</tbody></table>
</section>
<section>
    <h2>Years</h2>
    <label>Year <select id="year-filter"><option value="">All</option></select></label>
    <table><thead><tr><th>Year</th><th>Articles</th></tr></thead><tbody>{year_rows}</tbody></table>
</section>
<section>
    <h2>Oldest unread articles</h2>
    {backlog}
</section>
<script type="application/json" id="shelf-data">{data}</script>
<script src="{chart_js}"></script>
<script>
{script}
</script>"#,
            key_metrics = metric_cards("key-metrics", &view.key_metrics),
            highlights = metric_cards("highlights", &view.highlight_metrics),
            data = chart_data(view),
            chart_js = CHART_JS_URL,
            script = CHART_SCRIPT,
        );

        self.build_page("📊 Analytics", view, config, &content)
    }

    /// Project timeline.
    pub fn evolution_page(&self, view: &ViewModel, config: &RenderConfig) -> String {
        let mut events = String::new();
        if self.timeline.events.is_empty() {
            events.push_str(r#"<p class="empty">No timeline events yet.</p>"#);
        }
        for event in &self.timeline.events {
            let lines: String = event
                .description_lines
                .iter()
                .map(|line| format!("<li>{}</li>", html_escape(line)))
                .collect();
            let artifacts: String = event
                .artifacts
                .iter()
                .map(|artifact| {
                    format!(
                        r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
                        html_escape(&artifact.url),
                        html_escape(&artifact.name)
                    )
                })
                .collect();
            let _ = write!(
                events,
                r#"<article class="event"><time>{date}</time><h3>{title}</h3><ul>{lines}</ul><div class="artifacts">{artifacts}</div></article>"#,
                date = html_escape(&event.date),
                title = html_escape(&event.title),
            );
        }

        let content = format!(r#"<section class="timeline"><h2>Evolution</h2>{events}</section>"#);
        self.build_page("⏳ Evolution", view, config, &content)
    }

    /// Shared stylesheet.
    pub fn stylesheet(&self) -> String {
        format!(
            r#":root{{--accent:{accent};}}
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#2d3748;background:#f7fafc;}}
.header{{background:var(--accent);color:#fff;padding:12px 24px;display:flex;align-items:center;justify-content:space-between;}}
.header h1{{font-size:18px;font-weight:600;}}
.header nav a{{color:#fff;opacity:.85;text-decoration:none;margin-left:20px;font-size:14px;}}
.header nav a:hover{{opacity:1;}}
.container{{max-width:1100px;margin:0 auto;padding:24px;}}
section{{margin-bottom:32px;}}
h2{{font-size:20px;margin-bottom:12px;}}
.cards{{display:grid;grid-template-columns:repeat(auto-fit,minmax(160px,1fr));gap:16px;margin-bottom:24px;}}
.card{{background:#fff;border:1px solid #e2e8f0;border-radius:8px;padding:16px;text-align:center;}}
.card .value{{font-size:28px;font-weight:700;color:var(--accent);}}
.card .title{{font-size:13px;color:#718096;}}
.charts{{display:grid;grid-template-columns:repeat(auto-fit,minmax(420px,1fr));gap:16px;}}
.chart{{background:#fff;border:1px solid #e2e8f0;border-radius:8px;padding:16px;}}
.chart h3{{font-size:15px;margin-bottom:8px;}}
table{{width:100%;border-collapse:collapse;background:#fff;margin-top:8px;font-size:14px;}}
th,td{{padding:8px;border-bottom:1px solid #e2e8f0;text-align:left;}}
.history-banner{{background:#fffaf0;border:1px solid #fbd38d;padding:10px 14px;border-radius:6px;margin-bottom:20px;font-size:14px;}}
.history a{{margin-right:10px;font-size:14px;}}
.history a.current{{font-weight:700;}}
.button{{display:inline-block;padding:8px 18px;background:var(--accent);color:#fff;border-radius:4px;text-decoration:none;}}
.event{{background:#fff;border-left:4px solid var(--accent);padding:12px 16px;margin-bottom:12px;}}
.event time{{font-size:12px;color:#718096;}}
.event ul{{margin:8px 0 8px 20px;}}
.artifacts a{{margin-right:12px;font-size:13px;}}
.meta,.empty,.footer{{color:#718096;font-size:13px;}}
"#,
            accent = self.accent_color,
        )
    }

    fn build_page(
        &self,
        page_title: &str,
        view: &ViewModel,
        config: &RenderConfig,
        content: &str,
    ) -> String {
        let banner = if config.is_historical {
            format!(
                r#"<div class="history-banner">📅 Historical report for <strong>{key}</strong>. <a href="{base}analytics.html">View the latest report</a><div class="history">{links}</div></div>"#,
                key = config.report_key,
                base = config.base_url,
                links = history_links(config),
            )
        } else {
            String::new()
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{page_title} · {site_title}</title>
<link rel="stylesheet" href="{base}{stylesheet}">
</head>
<body>
<div class="header">
    <h1>{site_title}</h1>
    <nav><a href="{base}index.html">Home</a><a href="{base}analytics.html">Analytics</a><a href="{base}evolution.html">Evolution</a></nav>
</div>
<div class="container">
{banner}
{content}
<p class="footer">Last updated: {updated}</p>
</div>
</body>
</html>
"#,
            page_title = html_escape(page_title),
            site_title = html_escape(&self.title),
            base = config.base_url,
            stylesheet = STYLESHEET_PATH,
            updated = format_timestamp(view.last_updated),
        )
    }
}

impl SiteRenderer for HtmlRenderer {
    fn render_analytics(&self, view: &ViewModel, config: &RenderConfig) -> Result<()> {
        write_file(
            &config.output_dir,
            "analytics.html",
            &self.analytics_page(view, config),
        )?;
        info!(dir = %config.output_dir.display(), "Rendered analytics page");
        Ok(())
    }

    fn render_full(&self, view: &ViewModel, config: &RenderConfig) -> Result<()> {
        let dir = &config.output_dir;
        write_file(dir, STYLESHEET_PATH, &self.stylesheet())?;
        write_file(dir, "index.html", &self.index_page(view, config))?;
        write_file(dir, "analytics.html", &self.analytics_page(view, config))?;
        write_file(dir, "evolution.html", &self.evolution_page(view, config))?;
        info!(dir = %dir.display(), "Rendered full site");
        Ok(())
    }
}

fn write_file(dir: &Path, name: &str, content: &str) -> Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ShelfError::render_with_source(format!("Failed to create {}", parent.display()), e)
        })?;
    }
    fs::write(&path, content).map_err(|e| {
        ShelfError::render_with_source(format!("Failed to write {}", path.display()), e)
    })?;
    debug!(path = %path.display(), bytes = content.len(), "Wrote page");
    Ok(())
}

fn metric_cards(class: &str, metrics: &[KeyMetric]) -> String {
    let cards: String = metrics
        .iter()
        .map(|metric| {
            format!(
                r#"<div class="card"><div class="value">{}</div><div class="title">{}</div></div>"#,
                html_escape(&metric.value),
                html_escape(&metric.title)
            )
        })
        .collect();
    format!(r#"<section class="cards {class}">{cards}</section>"#)
}

fn history_links(config: &RenderConfig) -> String {
    if config.history_keys.is_empty() {
        return r#"<p class="empty">No archived reports.</p>"#.to_string();
    }
    config
        .history_keys
        .iter()
        .map(|key| {
            let class = if config.is_historical && *key == config.report_key {
                r#" class="current""#
            } else {
                ""
            };
            format!(
                r#"<a{class} href="{base}history/{key}/analytics.html">{key}</a>"#,
                base = config.base_url
            )
        })
        .collect()
}

/// Every chart payload of `view` as one JSON object, safe to embed in a
/// `<script>` element.
fn chart_data(view: &ViewModel) -> String {
    let charts = &view.charts;
    let json = format!(
        r#"{{"years":{},"months":{},"readUnreadByMonth":{},"readUnreadBySource":{},"readUnreadByYear":{},"unreadAgeDistribution":{},"unreadByYear":{},"allYears":{},"allSources":{}}}"#,
        charts.years,
        charts.months,
        charts.read_unread_by_month,
        charts.read_unread_by_source,
        charts.read_unread_by_year,
        charts.unread_age_distribution,
        charts.unread_by_year,
        charts.all_years,
        charts.all_sources,
    );
    json.replace('<', "\\u003c")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
