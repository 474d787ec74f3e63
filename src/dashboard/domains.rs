use crate::dashboard::records::{DomainRecord, Project};
use serde::Serialize;

/// Drops duplicate tags (legacy `rehlethadaf` already reads as `RHM`) and
/// files untagged domains under `RHM`.
pub fn normalize_projects(projects: &[Project]) -> Vec<Project> {
    let mut normalized: Vec<Project> = Vec::with_capacity(projects.len());
    for project in projects {
        if !normalized.contains(project) {
            normalized.push(*project);
        }
    }
    if normalized.is_empty() {
        normalized.push(Project::Rhm);
    }
    normalized
}

pub fn normalize_domains(domains: Vec<DomainRecord>) -> Vec<DomainRecord> {
    domains
        .into_iter()
        .map(|mut domain| {
            domain.projects = normalize_projects(&domain.projects);
            domain
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_income: f64,
    pub net_profit: f64,
}

/// Client income and client-minus-office profit over the domains tagged with `project`.
/// Blank costs count as 0.
pub fn project_stats(domains: &[DomainRecord], project: Project) -> ProjectStats {
    domains
        .iter()
        .filter(|domain| domain.projects.contains(&project))
        .fold(ProjectStats::default(), |mut stats, domain| {
            let client = domain.renewal_cost_client.unwrap_or(0.0);
            let office = domain.renewal_cost_office.unwrap_or(0.0);
            stats.total_income += client;
            stats.net_profit += client - office;
            stats
        })
}

/// Domains tagged with any of `projects`.
pub fn domains_in<'a>(domains: &'a [DomainRecord], projects: &[Project]) -> Vec<&'a DomainRecord> {
    domains
        .iter()
        .filter(|domain| domain.projects.iter().any(|p| projects.contains(p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::records::DomainStatus;
    use rstest::rstest;

    fn domain(name: &str, client: Option<f64>, office: Option<f64>, projects: Vec<Project>) -> DomainRecord {
        DomainRecord {
            id: Some(name.to_string()),
            domain_name: name.to_string(),
            status: DomainStatus::Active,
            collection_date: String::new(),
            renewal_date: String::new(),
            data_sheet: String::new(),
            outstanding_balance: None,
            renewal_cost_client: client,
            renewal_cost_office: office,
            renewal_cost_pova: None,
            renewal_cost_firefly: None,
            projects,
            has_installments: None,
            installment_count: None,
            installments_paid: None,
            is_online_catalog: None,
        }
    }

    #[rstest]
    #[case(vec![], vec![Project::Rhm])]
    #[case(vec![Project::Rhm, Project::Rhm], vec![Project::Rhm])]
    #[case(vec![Project::Pova, Project::Rhm], vec![Project::Pova, Project::Rhm])]
    #[case(vec![Project::Firefly], vec![Project::Firefly])]
    fn test_normalize_projects(#[case] input: Vec<Project>, #[case] expected: Vec<Project>) {
        assert_eq!(normalize_projects(&input), expected);
    }

    #[test]
    fn test_project_stats() {
        let domains = normalize_domains(vec![
            domain("a.sa", Some(100.0), Some(60.0), vec![]),
            domain("b.sa", Some(50.0), None, vec![Project::Rhm, Project::Pova]),
            domain("c.sa", Some(500.0), Some(10.0), vec![Project::Firefly]),
            domain("d.sa", None, Some(20.0), vec![Project::Rhm]),
        ]);

        let stats = project_stats(&domains, Project::Rhm);
        assert_eq!(stats.total_income, 150.0);
        assert_eq!(stats.net_profit, 40.0 + 50.0 - 20.0);
        assert_eq!(project_stats(&domains, Project::Other), ProjectStats::default());
    }

    #[test]
    fn test_domains_in() {
        let domains = vec![
            domain("a.sa", None, None, vec![Project::Rhm]),
            domain("b.sa", None, None, vec![Project::Other]),
            domain("c.sa", None, None, vec![Project::Firefly]),
        ];
        let names: Vec<_> = domains_in(&domains, &[Project::Rhm, Project::Other])
            .iter()
            .map(|d| d.domain_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.sa", "b.sa"]);
    }
}
