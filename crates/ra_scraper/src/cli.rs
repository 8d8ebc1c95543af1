use std::fmt::Write;

use clap::Args;
use ra_core::{Analysis, Result, Stage, DISCLAIMER};

use crate::manager::{AnalysisManager, STAGES};

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// URL of the financial article to analyze
    pub url: String,
    /// Also print the extracted article text
    #[arg(long)]
    pub show_original: bool,
    /// Print the analysis as JSON instead of a report
    #[arg(long)]
    pub json: bool,
}

/// Runs the pipeline for `args.url` and prints the outcome to stdout.
pub async fn handle_command(args: AnalyzeArgs, manager: &AnalysisManager) -> Result<Analysis> {
    let analysis = manager.analyze(&args.url).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", render_report(&analysis, args.show_original));
    }
    Ok(analysis)
}

pub fn render_report(analysis: &Analysis, show_original: bool) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, analysis, show_original);
    out
}

fn write_report(out: &mut String, analysis: &Analysis, show_original: bool) -> std::fmt::Result {
    writeln!(out, "1️⃣ {}", STAGES[0].0)?;
    writeln!(out, "URL: {}", analysis.url)?;
    writeln!(out)?;

    writeln!(out, "2️⃣ {}", STAGES[1].0)?;
    let summary = match (&analysis.summary, &analysis.failure) {
        (Some(summary), _) => summary,
        (None, Some(failure)) => {
            writeln!(out, "Failed to fetch or summarize the article: {}", failure.message)?;
            return Ok(());
        }
        (None, None) => return Ok(()),
    };
    writeln!(out, "Summary generated successfully!")?;
    writeln!(out, "{}", summary.text)?;
    if show_original {
        if let Some(article) = &analysis.article {
            writeln!(out)?;
            writeln!(out, "Original Article Text:")?;
            writeln!(out, "{}", article.extracted_text)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "3️⃣ {}", STAGES[2].0)?;
    let sentiment = match (&analysis.sentiment, &analysis.failure) {
        (Some(sentiment), _) => sentiment,
        (None, Some(failure)) if failure.stage == Stage::Sentiment => {
            writeln!(out, "Sentiment analysis failed: {}", failure.message)?;
            return Ok(());
        }
        _ => return Ok(()),
    };
    writeln!(out, "Sentiment:  {}", sentiment.label)?;
    writeln!(out, "Confidence: {}", sentiment.confidence_percent())?;
    writeln!(out)?;

    if let Some(advice) = &analysis.advice {
        writeln!(out, "4️⃣ {}", STAGES[3].0)?;
        writeln!(out, "{}", advice.message())?;
        writeln!(out)?;
        writeln!(out, "{}", DISCLAIMER)?;
    }
    Ok(())
}

/// The "how it works" text shown by `ra about`.
pub fn render_about() -> String {
    let mut out = String::from("Robo-Advisor: financial article analysis and investment advice\n\n");
    for (i, (title, description)) in STAGES.iter().enumerate() {
        out.push_str(&format!("{}. {}: {}\n", i + 1, title, description));
    }
    out.push('\n');
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ra_core::{Advice, Article, Error, SentimentResult, Summary};

    fn article() -> Article {
        Article {
            url: "https://news.example.com/a".to_string(),
            raw_html: Vec::new(),
            extracted_text: "Revenue rose.\nGuidance raised.".to_string(),
            fetched_at: Utc::now(),
        }
    }

    fn summary() -> Summary {
        Summary {
            text: "Company beats estimates.".to_string(),
            source_url: "https://news.example.com/a".to_string(),
            model: "fixed".to_string(),
        }
    }

    #[test]
    fn test_complete_report() {
        let mut analysis = Analysis::new("https://news.example.com/a");
        analysis.article = Some(article());
        analysis.summary = Some(summary());
        analysis.sentiment = Some(SentimentResult::new("POSITIVE", 0.87));
        analysis.advice = Some(Advice::Positive);

        let report = render_report(&analysis, false);
        assert!(report.contains("Summary generated successfully!\nCompany beats estimates."));
        assert!(report.contains("Sentiment:  POSITIVE"));
        assert!(report.contains("Confidence: 87.00%"));
        assert!(report.contains(Advice::Positive.message()));
        assert!(report.contains(DISCLAIMER));
        assert!(!report.contains("Original Article Text"));

        let report = render_report(&analysis, true);
        assert!(report.contains("Original Article Text:\nRevenue rose.\nGuidance raised."));
    }

    #[test]
    fn test_fetch_failure_report() {
        let analysis = Analysis::new("https://news.example.com/a")
            .fail(Stage::Fetch, &Error::Fetch("connection refused".to_string()));
        let report = render_report(&analysis, true);
        assert!(report.contains("Failed to fetch or summarize the article: Fetch error: connection refused"));
        assert!(!report.contains("3️⃣"));
        assert!(!report.contains(DISCLAIMER));
    }

    #[test]
    fn test_sentiment_failure_report() {
        let mut analysis = Analysis::new("https://news.example.com/a");
        analysis.article = Some(article());
        analysis.summary = Some(summary());
        let analysis = analysis.fail(Stage::Sentiment, &Error::Sentiment("model unavailable".to_string()));

        let report = render_report(&analysis, false);
        assert!(report.contains("Company beats estimates."));
        assert!(report.contains("Sentiment analysis failed: Sentiment error: model unavailable"));
        assert!(!report.contains("4️⃣"));
    }

    #[test]
    fn test_about_lists_stages() {
        let about = render_about();
        for (title, _) in STAGES {
            assert!(about.contains(title));
        }
        assert!(about.contains("4. Investment Advice"));
    }
}
