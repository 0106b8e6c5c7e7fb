//! Sites command: describe the site registry.

use crate::domain::{ProjectRequirement, SiteKind, SiteRequirements, Supplied};

/// Registry entry as shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSummary {
    pub kind: SiteKind,
    pub site_name: &'static str,
    pub description: &'static str,
    pub requirements: SiteRequirements,
}

impl SiteSummary {
    /// Short list of what the caller has to supply, e.g. `queue, project?`.
    pub fn needs(&self) -> String {
        let reqs = &self.requirements;
        let mut needs = Vec::new();
        push_supplied(&mut needs, "queue", reqs.queue);
        match reqs.project {
            ProjectRequirement::Required => needs.push("project".to_string()),
            ProjectRequirement::Optional => needs.push("project?".to_string()),
            ProjectRequirement::Forbidden => {}
        }
        push_supplied(&mut needs, "pegasus-home", reqs.pegasus_home);
        push_supplied(&mut needs, "login-host", reqs.login_host);
        push_supplied(&mut needs, "remote-scratch-dir", reqs.remote_scratch);
        if reqs.remote {
            needs.push("transfer-endpoint?".to_string());
        }
        if needs.is_empty() { "-".to_string() } else { needs.join(", ") }
    }
}

fn push_supplied(needs: &mut Vec<String>, name: &str, supplied: Supplied) {
    match supplied {
        Supplied::Required => needs.push(name.to_string()),
        Supplied::Optional => needs.push(format!("{}?", name)),
        Supplied::Fixed | Supplied::NotAccepted => {}
    }
}

pub fn list() -> Vec<SiteSummary> {
    SiteKind::ALL
        .into_iter()
        .map(|kind| SiteSummary {
            kind,
            site_name: kind.site_name(),
            description: kind.description(),
            requirements: kind.requirements(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_kind_once() {
        let sites = list();
        assert_eq!(sites.len(), SiteKind::ALL.len());
        assert_eq!(sites[0].kind, SiteKind::CondorPool);
    }

    #[test]
    fn needs_summarizes_requirements() {
        let by_kind = |kind| list().into_iter().find(|s| s.kind == kind).unwrap().needs();
        assert_eq!(by_kind(SiteKind::CondorPool), "-");
        assert_eq!(by_kind(SiteKind::Slurm), "queue, project?, pegasus-home?");
        assert_eq!(by_kind(SiteKind::SummitKubernetes), "project");
        assert_eq!(
            by_kind(SiteKind::RemoteSlurm),
            "queue, project?, pegasus-home, login-host, remote-scratch-dir, transfer-endpoint?"
        );
    }
}
