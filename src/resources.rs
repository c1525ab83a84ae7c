use crate::types::{ResourceSample, ResourceSamples};
use tokio::process::Command;
use tracing::warn;

const STATS_FORMAT: &str = "{{.Name}},{{.CPUPerc}},{{.MemUsage}}";

/// Best-effort container resource usage via `docker stats`.
pub struct DockerStats {
    program: String,
}

impl Default for DockerStats {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl DockerStats {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Never fails: any problem is logged and yields an empty result.
    pub async fn sample(&self, containers: &[String]) -> ResourceSamples {
        if containers.is_empty() {
            return ResourceSamples::new();
        }

        let output = match Command::new(&self.program)
            .args(["stats", "--no-stream", "--format", STATS_FORMAT])
            .args(containers)
            .output()
            .await
        {
            Ok(output) => output,
            Err(error) => {
                warn!("Resource sampling skipped, cannot run {}: {}", self.program, error);
                return ResourceSamples::new();
            }
        };

        if !output.status.success() {
            warn!(
                "Resource sampling skipped, {} exited with {}",
                self.program, output.status
            );
            return ResourceSamples::new();
        }

        let Ok(stdout) = String::from_utf8(output.stdout) else {
            warn!("Resource sampling skipped, output is not UTF-8");
            return ResourceSamples::new();
        };
        parse_stats(&stdout).unwrap_or_default()
    }
}

/// Parses `name,cpu,mem` lines. Returns `None` at the first line that does
/// not have all three fields.
pub fn parse_stats(output: &str) -> Option<ResourceSamples> {
    let mut samples = ResourceSamples::new();
    for line in output.trim().lines() {
        let mut parts = line.splitn(3, ',');
        let (Some(name), Some(cpu), Some(mem)) = (parts.next(), parts.next(), parts.next()) else {
            warn!("Resource sampling skipped, malformed stats line: {:?}", line);
            return None;
        };
        samples.insert(
            name.to_string(),
            ResourceSample {
                cpu: cpu.to_string(),
                mem: mem.to_string(),
            },
        );
    }
    Some(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_docker_stats_lines() {
        let output = "node-a,1.25%,10.5MiB / 1GiB\nnode-b,0.00%,3MiB / 1GiB\n";
        let samples = parse_stats(output).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples["node-a"].cpu, "1.25%");
        assert_eq!(samples["node-a"].mem, "10.5MiB / 1GiB");
        assert_eq!(samples["node-b"].cpu, "0.00%");
    }

    #[test]
    fn memory_column_may_contain_commas() {
        let samples = parse_stats("node-a,2%,1,5MiB / 2GiB").unwrap();
        assert_eq!(samples["node-a"].mem, "1,5MiB / 2GiB");
    }

    #[test]
    fn malformed_line_discards_the_whole_sample() {
        assert_eq!(parse_stats("garbage\nnode-a,1%,2MiB\n"), None);
        assert_eq!(parse_stats("node-a,1%,2MiB\nnode-b,3%"), None);
        assert!(parse_stats("garbage\n").unwrap_or_default().is_empty());
    }

    #[test]
    fn empty_output_is_an_empty_sample() {
        assert_eq!(parse_stats("\n"), Some(ResourceSamples::new()));
    }

    #[tokio::test]
    async fn missing_tool_yields_empty_samples() {
        let sampler = DockerStats::new("definitely-not-an-installed-docker-binary");
        let samples = sampler.sample(&["node-a".to_string()]).await;
        assert!(samples.is_empty());
    }

    #[tokio::test]
    async fn no_containers_means_no_query() {
        let samples = DockerStats::default().sample(&[]).await;
        assert!(samples.is_empty());
    }
}
