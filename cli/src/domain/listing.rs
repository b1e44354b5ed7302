//! Parsing of `launchctl list` output.
//!
//! The table is tab-separated with a `PID\tStatus\tLabel` header. A `-` in
//! the PID column means the job is loaded but not running.

/// One row of `launchctl list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListing {
    pub pid: Option<u32>,
    /// Last exit status; `None` when launchd reports `-`.
    pub last_exit_status: Option<i32>,
    pub label: String,
}

/// Parse the full `launchctl list` table, skipping the header and any line
/// that does not have three columns.
#[must_use]
pub fn parse_job_list(stdout: &str) -> Vec<JobListing> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut cols = line.split('\t');
            let pid = cols.next()?.trim();
            let status = cols.next()?.trim();
            let label = cols.next()?.trim();
            if label.is_empty() || pid == "PID" {
                return None;
            }
            Some(JobListing {
                pid: pid.parse().ok(),
                last_exit_status: status.parse().ok(),
                label: label.to_string(),
            })
        })
        .collect()
}

/// Running process id of `label`, if the job is loaded and running.
#[must_use]
pub fn pid_for_label(listings: &[JobListing], label: &str) -> Option<u32> {
    listings
        .iter()
        .find(|job| job.label == label)
        .and_then(|job| job.pid)
}
