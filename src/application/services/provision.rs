//! Qtree provisioning service
//!
//! Creates a qtree, an optional QoS policy and a tree quota rule, one POST
//! each. Every step reports its own outcome; a failed step never stops the
//! steps after it.

use std::fmt::Debug;
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{
    CreateRequest, FixedThroughput, ProvisionPlan, ProvisionReport, QosPolicyRequest,
    QtreeRequest, QuotaRuleRequest, Step, StepOutcome,
};
use crate::infrastructure::traits::OntapApi;

/// Service issuing the provisioning calls against one cluster.
pub struct ProvisioningService {
    api: Arc<dyn OntapApi>,
    settings: Arc<Settings>,
}

impl ProvisioningService {
    /// Create a new provisioning service.
    pub fn new(api: Arc<dyn OntapApi>, settings: Arc<Settings>) -> Self {
        Self { api, settings }
    }

    /// Serialize `request` and POST it to its collection, exactly once.
    fn submit<R: CreateRequest + Debug>(&self, request: &R) -> ApplicationResult<()> {
        debug!("submit: {} {:?}", R::COLLECTION, request);
        let body = serde_json::to_value(request)?;
        self.api.post(R::COLLECTION, &body)?;
        Ok(())
    }

    fn outcome(step: Step, target: &str, result: ApplicationResult<()>) -> StepOutcome {
        match result {
            Ok(()) => {
                info!("{} {} created", step, target);
                StepOutcome::created(step, target)
            }
            Err(e) => {
                error!("{} {} was not created: {}", step, target, e);
                StepOutcome::failed(step, target, e.to_string())
            }
        }
    }

    /// Create qtree `qtree_name` in `volume_name` on SVM `vserver_name`.
    #[instrument(skip(self))]
    pub fn create_qtree(
        &self,
        volume_name: &str,
        vserver_name: &str,
        qtree_name: &str,
    ) -> StepOutcome {
        let request = QtreeRequest::new(volume_name, vserver_name, qtree_name);
        Self::outcome(Step::Qtree, qtree_name, self.submit(&request))
    }

    /// Create a tree quota rule for `qtree_name`.
    ///
    /// Does not check that the qtree exists; the cluster rejects the rule if
    /// it does not.
    #[instrument(skip(self))]
    pub fn create_quota(
        &self,
        volume_name: &str,
        vserver_name: &str,
        qtree_name: &str,
        space_hard: u64,
        file_hard: u64,
    ) -> StepOutcome {
        let request =
            QuotaRuleRequest::tree(volume_name, vserver_name, qtree_name, space_hard, file_hard);
        Self::outcome(Step::QuotaRule, qtree_name, self.submit(&request))
    }

    /// Create fixed QoS policy `qos_name` on SVM `vserver_name` with the configured bounds.
    #[instrument(skip(self))]
    pub fn create_qos(&self, vserver_name: &str, qos_name: &str) -> StepOutcome {
        let fixed = FixedThroughput {
            min_throughput_iops: self.settings.qos.min_throughput_iops,
            max_throughput_iops: self.settings.qos.max_throughput_iops,
        };
        let request = QosPolicyRequest::fixed(vserver_name, qos_name, fixed);
        Self::outcome(Step::QosPolicy, qos_name, self.submit(&request))
    }

    /// Run every step of `plan` in order: qtree, QoS policy (if requested), quota rule.
    pub fn provision(&self, plan: &ProvisionPlan) -> ProvisionReport {
        info!(
            requested_by = %plan.requested_by,
            "provisioning qtree {} in {}/{}",
            plan.qtree_name,
            plan.vserver_name,
            plan.volume_name
        );
        let mut report = ProvisionReport::default();

        let qtree = self.create_qtree(&plan.volume_name, &plan.vserver_name, &plan.qtree_name);
        let qtree_created = qtree.is_created();
        report.push(qtree);

        if let Some(qos_name) = &plan.qos_policy {
            report.push(self.create_qos(&plan.vserver_name, qos_name));
        }

        if !qtree_created {
            warn!(
                "qtree {} was not created, attempting quota rule anyway",
                plan.qtree_name
            );
        }
        report.push(self.create_quota(
            &plan.volume_name,
            &plan.vserver_name,
            &plan.qtree_name,
            plan.space_hard_limit,
            plan.file_hard_limit,
        ));

        debug!("provision: {} failed step(s)", report.failures());
        report
    }
}
