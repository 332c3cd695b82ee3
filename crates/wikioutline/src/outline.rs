use crate::fetch::Upstream;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use serde::Serialize;
use std::io::IsTerminal;
use wikioutline_core::outline::{build_outline, OutlineLine, OutlineMode};

#[derive(Debug, clap::Args, Clone)]
pub struct OutlineOptions {
    /// Country (or any article subject) to outline
    #[clap(env = "OUTLINE_COUNTRY")]
    pub country: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct OutlineOutput {
    pub country: String,
    pub url: String,
    pub title: Option<String>,
    pub mode: OutlineMode,
    pub lines: Vec<OutlineLine>,
    pub markdown: String,
    pub fetch_time_ms: u64,
}

/// Fetch an article and render its outline
///
/// Shared by the HTTP handler and the `outline` subcommand.
pub async fn generate_outline(
    upstream: &Upstream,
    country: &str,
    mode: OutlineMode,
) -> std::result::Result<OutlineOutput, Error> {
    let article = upstream.fetch_article(country).await?;
    let outline = build_outline(&article.html, country, mode)?;

    log::debug!(
        "Rendered {} structural headings for '{country}'",
        outline.structural_count()
    );

    Ok(OutlineOutput {
        country: country.to_string(),
        url: article.url,
        title: outline.title().map(str::to_string),
        mode,
        markdown: outline.to_markdown(),
        lines: outline.lines().to_vec(),
        fetch_time_ms: article.fetch_time_ms,
    })
}

pub async fn run(options: OutlineOptions, global: crate::Global) -> Result<()> {
    let upstream = Upstream::new(&global.settings.upstream())?;

    if global.verbose {
        eprintln!("Fetching {}", upstream.url_for(&options.country));
    }

    let output =
        generate_outline(&upstream, &options.country, global.settings.outline_mode()).await?;

    if options.json {
        output_json(&output)?;
    } else {
        output_formatted(&output)?;
    }

    Ok(())
}

/// Formats outline output as JSON string
fn format_output_json(output: &OutlineOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Formats the metadata header shown on a terminal
fn format_output_text(output: &OutlineOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!("{}\n", "ARTICLE OUTLINE".bright_cyan().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format!(
        "\n{}: {}\n",
        "URL".green(),
        output.url.cyan().underline()
    ));

    if let Some(title) = &output.title {
        result.push_str(&format!(
            "{}: {}\n",
            "Title".green(),
            title.bright_white().bold()
        ));
    }

    result.push_str(&format!(
        "{}: {}\n",
        "Mode".green(),
        output.mode.to_string().bright_magenta()
    ));
    result.push_str(&format!(
        "{}: {}\n",
        "Total Lines".green(),
        output.lines.len().to_string().bright_yellow().bold()
    ));
    result.push_str(&format!(
        "{}: {}\n",
        "Fetch Time".green(),
        format!("{} ms", output.fetch_time_ms).bright_yellow()
    ));

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "USAGE".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    result.push_str(&format!(
        "\n{}:\n",
        "To get JSON output".bright_white().bold()
    ));
    result.push_str(&format!(
        "  {}\n",
        format!("wikioutline outline \"{}\" --json", output.country).cyan()
    ));

    if matches!(output.mode, OutlineMode::Contents) {
        result.push_str(&format!(
            "\n{}:\n",
            "To start with the article title".bright_white().bold()
        ));
        result.push_str(&format!(
            "  {}\n",
            format!("wikioutline outline \"{}\" --mode title", output.country).cyan()
        ));
    }

    result.push('\n');

    result
}

fn output_json(output: &OutlineOutput) -> Result<()> {
    let json = format_output_json(output)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(output: &OutlineOutput) -> Result<()> {
    if std::io::stdout().is_terminal() {
        eprintln!("{}", format_output_text(output));
        for line in output.markdown.lines() {
            println!("{}", line.white());
        }
    } else {
        println!("{}", output.markdown);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_output(mode: OutlineMode, with_title: bool) -> OutlineOutput {
        let mut lines = vec![OutlineLine::new(1, "Contents")];
        if with_title {
            lines.push(OutlineLine::new(2, "France"));
        }
        lines.push(OutlineLine::new(3, "History"));
        lines.push(OutlineLine::new(3, "Geography"));

        let markdown = lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        OutlineOutput {
            country: "France".to_string(),
            url: "https://en.wikipedia.org/wiki/France".to_string(),
            title: with_title.then(|| "France".to_string()),
            mode,
            lines,
            markdown,
            fetch_time_ms: 250,
        }
    }

    async fn spawn_upstream() -> Upstream {
        use axum::{extract::Path, response::Html, routing::get, Router};

        async fn article(Path(slug): Path<String>) -> Html<&'static str> {
            match slug.as_str() {
                "Untitled" => Html(r#"<div id="content"><h2>History</h2></div>"#),
                _ => Html(
                    r#"<h1 id="firstHeading">Peru</h1><div id="content"><h2>History</h2></div>"#,
                ),
            }
        }

        let app = Router::new().route("/wiki/{slug}", get(article));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Upstream::new(&crate::fetch::UpstreamConfig {
            base_url: format!("http://{addr}"),
            user_agent: crate::config::DEFAULT_USER_AGENT.to_string(),
            timeout: std::time::Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_outline_reports_detected_title_only() {
        let upstream = spawn_upstream().await;

        let output = generate_outline(&upstream, "Untitled", OutlineMode::Title)
            .await
            .unwrap();
        assert_eq!(output.markdown, "# Untitled\n## History");
        assert_eq!(output.title, None);

        let output = generate_outline(&upstream, "peru", OutlineMode::Title)
            .await
            .unwrap();
        assert_eq!(output.title.as_deref(), Some("Peru"));

        let output = generate_outline(&upstream, "peru", OutlineMode::Contents)
            .await
            .unwrap();
        assert_eq!(output.title.as_deref(), Some("Peru"));
        assert_eq!(output.markdown, "# Contents\n## Peru\n### History");
    }

    #[test]
    fn test_format_output_json_basic() {
        let output = create_test_output(OutlineMode::Contents, true);
        let json = format_output_json(&output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["country"], "France");
        assert_eq!(value["url"], "https://en.wikipedia.org/wiki/France");
        assert_eq!(value["title"], "France");
        assert_eq!(value["mode"], "contents");
        assert_eq!(value["lines"][2]["level"], 3);
        assert_eq!(value["lines"][2]["text"], "History");
        assert_eq!(
            value["markdown"],
            "# Contents\n## France\n### History\n### Geography"
        );
        assert_eq!(value["fetch_time_ms"], 250);
    }

    #[test]
    fn test_format_output_json_without_title() {
        let output = create_test_output(OutlineMode::Contents, false);
        let json = format_output_json(&output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["title"].is_null());
    }

    #[test]
    fn test_format_output_text_contents_mode() {
        let output = create_test_output(OutlineMode::Contents, true);
        let formatted = format_output_text(&output);

        assert!(formatted.contains("ARTICLE OUTLINE"));
        assert!(formatted.contains("https://en.wikipedia.org/wiki/France"));
        assert!(formatted.contains("Title"));
        assert!(formatted.contains("contents"));
        assert!(formatted.contains("Total Lines"));
        assert!(formatted.contains("250 ms"));
        assert!(formatted.contains("To get JSON output"));
        assert!(formatted.contains("--mode title"));
    }

    #[test]
    fn test_format_output_text_title_mode_hides_mode_hint() {
        let output = create_test_output(OutlineMode::Title, false);
        let formatted = format_output_text(&output);

        assert!(!formatted.contains("Title"));
        assert!(!formatted.contains("To start with the article title"));
        assert!(formatted.contains("--json"));
    }
}
