//! HTML brief rendering
//!
//! Renders a weekly brief as a self-contained HTML document with embedded
//! CSS, suitable for offline preview and print-to-PDF. All caller-supplied
//! text is escaped; template strings pass through verbatim.

use crate::brief::WeeklyBrief;
use crate::eri::{eri_color, EriDimension, KeyDevelopment, Scenario};

/// Render a weekly brief as a standalone HTML document
pub fn render_brief(brief: &WeeklyBrief) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title} - Week {week}</title>
    <style>{css}</style>
</head>
<body>
    {cover}
    {executive_summary}
    {dimensions}
    {developments}
    {energy_watch}
    {stakeholders}
    {scenarios}
    {indicators}
    {methodology}
</body>
</html>"#,
        title = html_escape(&brief.title),
        week = brief.week_number,
        css = inline_css(brief.eri_score),
        cover = render_cover(brief),
        executive_summary = render_executive_summary(brief),
        dimensions = render_dimensions(&brief.eri_section.dimensions),
        developments = render_developments(&brief.key_developments),
        energy_watch = render_energy_watch(brief),
        stakeholders = render_stakeholder_table(brief),
        scenarios = render_scenarios(&brief.scenario_outlook),
        indicators = render_indicators(&brief.indicators_to_watch),
        methodology = render_methodology(&brief.methodology),
    )
}

fn render_cover(brief: &WeeklyBrief) -> String {
    format!(
        r#"<div class="cover">
        <h1>{title}</h1>
        <div class="subtitle">{subtitle}</div>
        <div class="eri-badge">ERI: {score}</div>
        <div class="meta">
            Week {week}, {year} | Version {version}<br>
            Released: {released}
        </div>
    </div>"#,
        title = html_escape(&brief.title),
        subtitle = html_escape(&brief.subtitle),
        score = brief.eri_score,
        week = brief.week_number,
        year = brief.year,
        version = html_escape(&brief.version),
        released = brief.release_date.format("%Y-%m-%d"),
    )
}

fn render_executive_summary(brief: &WeeklyBrief) -> String {
    let summary = &brief.executive_summary;
    let lines = [
        ("What Changed", &summary.what_changed),
        ("What Is Stable", &summary.what_is_stable),
        ("Risk Increased", &summary.risk_increased),
        ("Risk Decreased", &summary.risk_decreased),
        ("Military Activity", &summary.military_activity),
        ("Proxy Activity", &summary.proxy_activity),
        ("Diplomatic Track", &summary.diplomatic_track),
    ];
    let body: String = lines
        .iter()
        .map(|(label, text)| {
            format!(
                "<p><strong>{}:</strong> {}</p>\n",
                label,
                html_escape(text)
            )
        })
        .collect();
    format!(
        "<h2>Executive Summary</h2>\n<div class=\"executive-summary\">\n{}</div>",
        body
    )
}

fn render_dimensions(dimensions: &[EriDimension]) -> String {
    let cards: String = dimensions
        .iter()
        .map(|d| {
            format!(
                r#"<div class="dimension-card">
            <h4>{name} ({score})</h4>
            <div class="score-bar"><div class="score-fill" style="width: {score}%"></div></div>
        </div>
"#,
                name = html_escape(&d.name),
                score = d.score,
            )
        })
        .collect();
    format!(
        "<h2>Escalation Risk Index</h2>\n<div class=\"dimension-grid\">\n{}</div>",
        cards
    )
}

fn render_developments(developments: &[KeyDevelopment]) -> String {
    let cards: String = developments
        .iter()
        .map(|kd| {
            format!(
                r#"<div class="development">
        <h4>{headline}</h4>
        <p><strong>What Happened:</strong> {what_happened}</p>
        <p><strong>Why It Matters:</strong> {why_it_matters}</p>
        <p><strong>Who Benefits:</strong> {who_benefits}</p>
        <p><strong>Who Loses:</strong> {who_loses}</p>
        <p><strong>Escalation Impact:</strong> {impact}/10</p>
    </div>
"#,
                headline = html_escape(&kd.headline),
                what_happened = html_escape(&kd.what_happened),
                why_it_matters = html_escape(&kd.why_it_matters),
                who_benefits = html_escape(&kd.who_benefits),
                who_loses = html_escape(&kd.who_loses),
                impact = kd.escalation_impact,
            )
        })
        .collect();
    format!("<h2>Key Developments</h2>\n{}", cards)
}

fn render_energy_watch(brief: &WeeklyBrief) -> String {
    let watch = &brief.energy_watch;
    let india = watch
        .india_angle
        .as_ref()
        .map(|angle| {
            format!(
                "<p><strong>India Angle:</strong> {}</p>\n",
                html_escape(angle)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<h2>Energy &amp; Economic Watch</h2>
    <p><strong>Oil Movement:</strong> {oil}</p>
    <p><strong>Shipping Risk:</strong> {shipping}</p>
    <p><strong>Sanctions Update:</strong> {sanctions}</p>
    <p><strong>Currency Adjustments:</strong> {currency}</p>
    {india}"#,
        oil = html_escape(&watch.oil_movement),
        shipping = html_escape(&watch.shipping_risk),
        sanctions = html_escape(&watch.sanctions_update),
        currency = html_escape(&watch.currency_adjustments),
        india = india,
    )
}

fn render_stakeholder_table(brief: &WeeklyBrief) -> String {
    let rows: String = brief
        .stakeholder_positions
        .iter()
        .map(|sp| {
            format!(
                r#"<tr>
                <td><strong>{actor}</strong></td>
                <td>{position}</td>
                <td>{movement}</td>
                <td>{impact}/10</td>
            </tr>
"#,
                actor = html_escape(&sp.actor),
                position = html_escape(&sp.current_position),
                movement = html_escape(&sp.weekly_movement),
                impact = sp.escalation_impact,
            )
        })
        .collect();
    format!(
        r#"<h2>Strategic Stakeholder Positioning</h2>
    <table class="stakeholder-table">
        <thead>
            <tr>
                <th>Actor</th>
                <th>Current Position</th>
                <th>Weekly Movement</th>
                <th>Escalation Impact</th>
            </tr>
        </thead>
        <tbody>
{rows}        </tbody>
    </table>"#,
        rows = rows,
    )
}

fn render_scenarios(scenarios: &[Scenario]) -> String {
    let blocks: String = scenarios
        .iter()
        .map(|s| {
            format!(
                r#"<div class="scenario probability-{probability}">
        <h4>{name} ({probability} probability)</h4>
        <p>{description}</p>
        <p><strong>Triggers:</strong> {triggers}</p>
    </div>
"#,
                probability = s.probability.as_str(),
                name = html_escape(&s.name),
                description = html_escape(&s.description),
                triggers = html_escape(&s.triggers.join(", ")),
            )
        })
        .collect();
    format!("<h2>Scenario Outlook</h2>\n{}", blocks)
}

fn render_indicators(indicators: &[String]) -> String {
    let items: String = indicators
        .iter()
        .map(|i| format!("<li>{}</li>\n", html_escape(i)))
        .collect();
    format!(
        "<h2>Indicators to Watch Next Week</h2>\n<ul class=\"indicators-list\">\n{}</ul>",
        items
    )
}

fn render_methodology(methodology: &str) -> String {
    format!(
        r#"<div class="methodology">
        <h3>Methodology &amp; Disclaimer</h3>
        <p>{methodology}</p>
        <p><strong>Disclaimer:</strong> This brief is for informational purposes only and does not constitute investment, legal, or policy advice. All analysis is based on open-source information and represents assessments of probability, not predictions of specific outcomes.</p>
    </div>"#,
        methodology = html_escape(methodology),
    )
}

/// Embedded stylesheet. The badge and score-bar colors track the overall
/// score through [`eri_color`].
fn inline_css(eri_score: u32) -> String {
    format!(
        r#"
body {{
    font-family: 'Georgia', serif;
    line-height: 1.6;
    color: #1a1a1a;
    max-width: 800px;
    margin: 0 auto;
    padding: 40px;
}}
.cover {{
    text-align: center;
    padding: 60px 0;
    border-bottom: 3px solid #0B1F3A;
    margin-bottom: 40px;
}}
.cover h1 {{
    font-size: 28px;
    color: #0B1F3A;
    margin-bottom: 10px;
}}
.cover .subtitle {{
    font-size: 14px;
    color: #5A6A7A;
    margin-bottom: 20px;
}}
.cover .meta {{
    font-size: 12px;
    color: #666;
}}
.eri-badge {{
    display: inline-block;
    padding: 15px 30px;
    background: {color};
    color: white;
    font-size: 24px;
    font-weight: bold;
    border-radius: 8px;
    margin: 20px 0;
}}
h2 {{
    color: #0B1F3A;
    border-bottom: 2px solid #C7A84A;
    padding-bottom: 10px;
    margin-top: 40px;
}}
h3 {{
    color: #5A6A7A;
    margin-top: 25px;
}}
.executive-summary {{
    background: #f8f9fa;
    padding: 20px;
    border-left: 4px solid #0B1F3A;
    margin: 20px 0;
}}
.dimension-grid {{
    display: grid;
    grid-template-columns: repeat(2, 1fr);
    gap: 15px;
    margin: 20px 0;
}}
.dimension-card {{
    background: #f8f9fa;
    padding: 15px;
    border-radius: 6px;
}}
.dimension-card h4 {{
    margin: 0 0 10px 0;
    color: #0B1F3A;
}}
.score-bar {{
    height: 8px;
    background: #e0e0e0;
    border-radius: 4px;
    overflow: hidden;
}}
.score-fill {{
    height: 100%;
    background: {color};
}}
.development {{
    background: #fff;
    border: 1px solid #e0e0e0;
    padding: 20px;
    margin: 15px 0;
    border-radius: 6px;
}}
.development h4 {{
    color: #0B1F3A;
    margin-top: 0;
}}
.stakeholder-table {{
    width: 100%;
    border-collapse: collapse;
    margin: 20px 0;
}}
.stakeholder-table th,
.stakeholder-table td {{
    padding: 12px;
    text-align: left;
    border-bottom: 1px solid #e0e0e0;
}}
.stakeholder-table th {{
    background: #0B1F3A;
    color: white;
}}
.scenario {{
    padding: 15px;
    margin: 10px 0;
    border-left: 4px solid #C7A84A;
    background: #f8f9fa;
}}
.scenario.probability-high {{
    border-left-color: #ef4444;
}}
.scenario.probability-moderate {{
    border-left-color: #eab308;
}}
.scenario.probability-low {{
    border-left-color: #22c55e;
}}
.indicators-list {{
    list-style: none;
    padding: 0;
}}
.indicators-list li {{
    padding: 8px 0;
    border-bottom: 1px dotted #e0e0e0;
}}
.methodology {{
    font-size: 11px;
    color: #666;
    border-top: 1px solid #e0e0e0;
    padding-top: 20px;
    margin-top: 40px;
}}
"#,
        color = eri_color(eri_score),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
