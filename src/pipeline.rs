use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::platforms;
use crate::search::TavilyClient;
use crate::store;
use crate::summarize::OllamaClient;
use crate::table;

const MAX_SEARCH_RESULTS: u32 = 10;
const PASS_DELAY: Duration = Duration::from_secs(3);

/// Run stats returned after completion.
pub struct RunStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// Process each platform in order: search → summarize → write, with a fixed
/// delay between passes to pace the external APIs. A failure in any stage
/// is reported for that platform and the run continues.
pub async fn run_platforms(
    platform_list: &[String],
    api_key: String,
    csv_path: &Path,
) -> Result<RunStats> {
    let search = TavilyClient::new(api_key);
    let llm = OllamaClient::from_env();
    let total = platform_list.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut ok = 0usize;
    let mut errors = 0usize;

    for (i, platform) in platform_list.iter().enumerate() {
        pb.set_message(platform.clone());
        match run_pass(&search, &llm, platform, csv_path).await {
            Ok(rows) => {
                ok += 1;
                info!(
                    "Saved {} influencers to {} ({} rows total)",
                    platform,
                    csv_path.display(),
                    rows
                );
            }
            Err(e) => {
                errors += 1;
                warn!("Failed to collect {} data: {:#}", platform, e);
            }
        }
        pb.inc(1);

        if i + 1 < total {
            tokio::time::sleep(PASS_DELAY).await;
        }
    }

    pb.finish_and_clear();
    info!("Processed {} platforms ({} ok, {} errors)", total, ok, errors);

    Ok(RunStats { total, ok, errors })
}

/// One pipeline pass for one platform.
async fn run_pass(
    search: &TavilyClient,
    llm: &OllamaClient,
    platform: &str,
    csv_path: &Path,
) -> Result<usize> {
    info!("Searching for {} influencers", platform);
    let query = platforms::search_query(platform);
    let context = search.search(&query, MAX_SEARCH_RESULTS).await?;

    info!("Summarizing influencers for {}", platform);
    let markdown = llm.summarize(platform, &context).await?;

    write_stage(&markdown, platform, csv_path)
}

/// Write stage: parse the model output, tag rows with the platform, and
/// fold them into the accumulation file. A parse failure returns before
/// the file is touched.
pub fn write_stage(markdown: &str, platform: &str, csv_path: &Path) -> Result<usize> {
    let mut batch = table::parse_markdown_table(markdown)?;
    batch.push_column("PlatformGroup", platform);
    store::append_batch(csv_path, batch)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const JANE_DOE: &str = "\
| Name | Platform | Followers | Niche | Engagement | Content Type | Link | Source |
|---|---|---|---|---|---|---|---|
| Jane Doe | LinkedIn | 50K | AI Ethics | High | Posts | http://x | web |
";

    #[test]
    fn jane_doe_scenario_persists_one_tagged_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.csv");

        let total = write_stage(JANE_DOE, "LinkedIn", &path).unwrap();
        assert_eq!(total, 1);

        let t = store::load(&path).unwrap().unwrap();
        let tag = t.column_index("PlatformGroup").unwrap();
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0][tag], "LinkedIn");
        assert_eq!(t.rows[0][0], "Jane Doe");
    }

    #[test]
    fn every_persisted_row_carries_its_pass_platform() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.csv");

        write_stage(JANE_DOE, "LinkedIn", &path).unwrap();
        let md = "| Name | Followers |\n| Alice | 1M |\n| Bob | 200K |\n";
        write_stage(md, "YouTube", &path).unwrap();

        let t = store::load(&path).unwrap().unwrap();
        let tag = t.column_index("PlatformGroup").unwrap();
        let groups: Vec<&str> = t.rows.iter().map(|r| r[tag].as_str()).collect();
        assert_eq!(groups, vec!["LinkedIn", "YouTube", "YouTube"]);
    }

    #[test]
    fn repeated_pass_appends_without_dedup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.csv");

        assert_eq!(write_stage(JANE_DOE, "LinkedIn", &path).unwrap(), 1);
        assert_eq!(write_stage(JANE_DOE, "LinkedIn", &path).unwrap(), 2);
    }

    #[test]
    fn unparseable_output_reports_error_and_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.csv");
        write_stage(JANE_DOE, "LinkedIn", &path).unwrap();

        let err = write_stage("Sorry, I found nothing.", "YouTube", &path).unwrap_err();
        assert!(err.to_string().contains("no table lines"));

        let t = store::load(&path).unwrap().unwrap();
        assert_eq!(t.rows.len(), 1);
    }

    #[test]
    fn batches_with_different_columns_union_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.csv");

        write_stage("| Name | Followers |\n| Jane | 50K |\n", "LinkedIn", &path).unwrap();
        write_stage("| Name | Niche |\n| John | Robotics |\n", "YouTube", &path).unwrap();

        let t = store::load(&path).unwrap().unwrap();
        assert_eq!(
            t.columns,
            vec!["Name", "Followers", "PlatformGroup", "Niche"]
        );
        assert_eq!(t.rows[0], vec!["Jane", "50K", "LinkedIn", ""]);
        assert_eq!(t.rows[1], vec!["John", "", "YouTube", "Robotics"]);
    }
}
