//! Domain entities: request payloads and provisioning outcomes

use std::fmt;

use serde::Serialize;

/// Reference to a named ONTAP object (`{"name": "..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRef {
    pub name: String,
}

impl NamedRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A payload that is created by POSTing it to an API collection.
pub trait CreateRequest: Serialize {
    /// Collection path relative to `/api/`.
    const COLLECTION: &'static str;
}

/// Request body for creating a qtree inside a volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QtreeRequest {
    pub name: String,
    pub svm: NamedRef,
    pub volume: NamedRef,
}

impl QtreeRequest {
    pub fn new(volume_name: &str, vserver_name: &str, qtree_name: &str) -> Self {
        Self {
            name: qtree_name.to_string(),
            svm: NamedRef::new(vserver_name),
            volume: NamedRef::new(volume_name),
        }
    }
}

impl CreateRequest for QtreeRequest {
    const COLLECTION: &'static str = "storage/qtrees";
}

/// Hard limit wrapper (`{"hard_limit": n}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HardLimit {
    pub hard_limit: u64,
}

/// Scope of a quota rule. Only tree rules are created here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaType {
    Tree,
}

/// Request body for a tree quota rule on a qtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaRuleRequest {
    pub volume: NamedRef,
    pub svm: NamedRef,
    pub qtree: NamedRef,
    pub files: HardLimit,
    pub space: HardLimit,
    #[serde(rename = "type")]
    pub rule_type: QuotaType,
}

impl QuotaRuleRequest {
    pub fn tree(
        volume_name: &str,
        vserver_name: &str,
        qtree_name: &str,
        space_hard: u64,
        file_hard: u64,
    ) -> Self {
        Self {
            volume: NamedRef::new(volume_name),
            svm: NamedRef::new(vserver_name),
            qtree: NamedRef::new(qtree_name),
            files: HardLimit {
                hard_limit: file_hard,
            },
            space: HardLimit {
                hard_limit: space_hard,
            },
            rule_type: QuotaType::Tree,
        }
    }
}

impl CreateRequest for QuotaRuleRequest {
    const COLLECTION: &'static str = "storage/quota/rules";
}

/// Fixed throughput bounds of a QoS policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixedThroughput {
    pub min_throughput_iops: u64,
    pub max_throughput_iops: u64,
}

/// Request body for a fixed QoS policy group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QosPolicyRequest {
    pub name: String,
    pub svm: NamedRef,
    pub fixed: FixedThroughput,
}

impl QosPolicyRequest {
    pub fn fixed(vserver_name: &str, qos_name: &str, fixed: FixedThroughput) -> Self {
        Self {
            name: qos_name.to_string(),
            svm: NamedRef::new(vserver_name),
            fixed,
        }
    }
}

impl CreateRequest for QosPolicyRequest {
    const COLLECTION: &'static str = "storage/qos/policies";
}

/// Everything one provisioning run needs, parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionPlan {
    pub volume_name: String,
    pub vserver_name: String,
    pub qtree_name: String,
    /// QoS policy to create; `None` skips the QoS step.
    pub qos_policy: Option<String>,
    pub space_hard_limit: u64,
    pub file_hard_limit: u64,
    /// Requesting user, for the audit log only.
    pub requested_by: String,
}

/// A single provisioning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Qtree,
    QosPolicy,
    QuotaRule,
}

impl Step {
    pub fn label(&self) -> &'static str {
        match self {
            Step::Qtree => "Qtree",
            Step::QosPolicy => "QoS policy",
            Step::QuotaRule => "Quota rule",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Created,
    Failed(String),
}

/// Result of one step, with the name of the object it targeted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: Step,
    pub target: String,
    pub status: StepStatus,
}

impl StepOutcome {
    pub fn created(step: Step, target: impl Into<String>) -> Self {
        Self {
            step,
            target: target.into(),
            status: StepStatus::Created,
        }
    }

    pub fn failed(step: Step, target: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            step,
            target: target.into(),
            status: StepStatus::Failed(details.into()),
        }
    }

    pub fn is_created(&self) -> bool {
        self.status == StepStatus::Created
    }

    /// Line reported to the operator for this outcome.
    pub fn message(&self) -> String {
        match &self.status {
            StepStatus::Created => match self.step {
                Step::Qtree => format!("qtree {} created successfully", self.target),
                Step::QosPolicy => format!("QoS policy {} created successfully", self.target),
                Step::QuotaRule => "Quota rule created successfully".to_string(),
            },
            StepStatus::Failed(details) => {
                format!("Error: {} was not created: {}", self.step.label(), details)
            }
        }
    }
}

/// Ordered outcomes of a provisioning run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    outcomes: Vec<StepOutcome>,
}

impl ProvisionReport {
    pub fn push(&mut self, outcome: StepOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_created()).count()
    }

    pub fn all_created(&self) -> bool {
        self.failures() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_qtree_request_when_serialized_then_nests_svm_and_volume() {
        let req = QtreeRequest::new("vol1", "svm1", "qt1");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"name": "qt1", "svm": {"name": "svm1"}, "volume": {"name": "vol1"}})
        );
    }

    #[test]
    fn given_quota_request_when_serialized_then_type_is_tree() {
        let req = QuotaRuleRequest::tree("vol1", "svm1", "qt1", 1000, 500);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "volume": {"name": "vol1"},
                "svm": {"name": "svm1"},
                "qtree": {"name": "qt1"},
                "files": {"hard_limit": 500},
                "space": {"hard_limit": 1000},
                "type": "tree"
            })
        );
    }

    #[test]
    fn given_qos_request_when_serialized_then_has_fixed_bounds() {
        let req = QosPolicyRequest::fixed(
            "svm1",
            "gold",
            FixedThroughput {
                min_throughput_iops: 10,
                max_throughput_iops: 1500,
            },
        );
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "name": "gold",
                "svm": {"name": "svm1"},
                "fixed": {"min_throughput_iops": 10, "max_throughput_iops": 1500}
            })
        );
    }

    #[test]
    fn given_created_qtree_when_message_then_names_the_qtree() {
        let outcome = StepOutcome::created(Step::Qtree, "qt1");
        assert_eq!(outcome.message(), "qtree qt1 created successfully");
    }

    #[test]
    fn given_failed_quota_when_message_then_uses_error_template() {
        let outcome = StepOutcome::failed(Step::QuotaRule, "qt1", "duplicate entry");
        assert_eq!(
            outcome.message(),
            "Error: Quota rule was not created: duplicate entry"
        );
    }

    #[test]
    fn given_one_failure_when_counting_then_report_is_incomplete() {
        let mut report = ProvisionReport::default();
        report.push(StepOutcome::failed(Step::Qtree, "qt1", "boom"));
        report.push(StepOutcome::created(Step::QuotaRule, "qt1"));
        assert_eq!(report.failures(), 1);
        assert!(!report.all_created());
    }
}
