use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const DOMAINS_COLLECTION: &str = "domains";
pub const TODOS_COLLECTION: &str = "todos";
pub const FAULTS_COLLECTION: &str = "faults";
pub const GENERAL_COLLECTION: &str = "general";

/// Billing group a domain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Project {
    /// Also accepts the legacy `rehlethadaf` tag.
    #[serde(rename = "RHM", alias = "rehlethadaf")]
    Rhm,
    #[serde(rename = "pova")]
    Pova,
    #[serde(rename = "other")]
    Other,
    #[serde(rename = "firefly")]
    Firefly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub domain_name: String,
    pub status: DomainStatus,
    #[serde(default)]
    pub collection_date: String,
    #[serde(default)]
    pub renewal_date: String,
    #[serde(default)]
    pub data_sheet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outstanding_balance: Option<f64>,
    #[serde(default, with = "blank_or_number")]
    pub renewal_cost_client: Option<f64>,
    #[serde(default, with = "blank_or_number")]
    pub renewal_cost_office: Option<f64>,
    #[serde(
        default,
        with = "blank_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub renewal_cost_pova: Option<f64>,
    #[serde(
        default,
        with = "blank_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub renewal_cost_firefly: Option<f64>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_installments: Option<bool>,
    #[serde(
        default,
        with = "blank_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub installment_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments_paid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online_catalog: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unset for general todos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_high_priority: bool,
}

impl TodoRecord {
    pub fn new(text: impl Into<String>, domain_id: Option<String>) -> Self {
        Self {
            id: None,
            domain_id,
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
            is_high_priority: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl FaultRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// A record kept in one document-store collection, keyed by its id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    const COLLECTION: &'static str;

    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);

    /// Display order of a loaded list. Stored order by default.
    fn sort(_records: &mut [Self]) {}
}

impl Record for DomainRecord {
    const COLLECTION: &'static str = DOMAINS_COLLECTION;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Record for TodoRecord {
    const COLLECTION: &'static str = TODOS_COLLECTION;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn sort(records: &mut [Self]) {
        crate::dashboard::todos::sort_todos(records);
    }
}

impl Record for FaultRecord {
    const COLLECTION: &'static str = FAULTS_COLLECTION;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn sort(records: &mut [Self]) {
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

/// Cost fields are stored as a number or `""` when left blank in the form.
mod blank_or_number {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => serializer.serialize_f64(*n),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(n)) => Ok(Some(n)),
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Raw::Text(s)) => s.trim().parse().map(Some).map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_domain_blank_costs() {
        let domain: DomainRecord = serde_json::from_value(json!({
            "domainName": "example.sa",
            "status": "active",
            "collectionDate": "2025-01-01",
            "renewalDate": "2026-01-01",
            "dataSheet": "",
            "renewalCostClient": 120,
            "renewalCostOffice": "",
            "projects": ["rehlethadaf", "pova"]
        }))
        .unwrap();

        assert_eq!(domain.renewal_cost_client, Some(120.0));
        assert_eq!(domain.renewal_cost_office, None);
        assert_eq!(domain.renewal_cost_pova, None);
        assert_eq!(domain.projects, vec![Project::Rhm, Project::Pova]);

        let back = serde_json::to_value(&domain).unwrap();
        assert_eq!(back["renewalCostOffice"], "");
        assert_eq!(back["projects"], json!(["RHM", "pova"]));
        assert!(back.get("renewalCostPova").is_none());
        assert!(back.get("id").is_none());
    }

    #[test]
    fn test_numeric_string_cost_is_accepted() {
        let domain: DomainRecord = serde_json::from_value(json!({
            "domainName": "example.com",
            "status": "inactive",
            "renewalCostClient": "75.5",
            "renewalCostOffice": 40
        }))
        .unwrap();
        assert_eq!(domain.renewal_cost_client, Some(75.5));
        assert!(domain.projects.is_empty());
    }

    #[test]
    fn test_todo_defaults() {
        let todo: TodoRecord = serde_json::from_value(json!({
            "text": "renew SSL",
            "createdAt": "2025-06-01T08:30:00.000Z"
        }))
        .unwrap();
        assert!(!todo.completed);
        assert!(!todo.is_high_priority);
        assert!(todo.domain_id.is_none());
    }
}
