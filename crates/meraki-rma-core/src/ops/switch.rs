// ── Switch operations ──
//
// Stack membership, configuration cloning, and link aggregation repair.
// The decisions (which stack, what to do with an aggregation) are pure
// functions so they can be checked without a Dashboard.

use meraki_rma_api::types::{LinkAggregation, SwitchPort, SwitchStack};
use tracing::debug;

use crate::dashboard::Dashboard;
use crate::error::CoreError;
use crate::ops::network::ResolvedNetwork;
use crate::progress::{Progress, RmaEvent};

/// Id of the stack containing `serial`, if any. A switch belongs to at
/// most one stack.
pub fn match_stack<'s>(stacks: &'s [SwitchStack], serial: &str) -> Option<&'s str> {
    stacks
        .iter()
        .find(|s| s.serials.iter().any(|m| m == serial))
        .map(|s| s.id.as_str())
}

/// What to do with one link aggregation when `source` is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateAction {
    /// Every port sits on one switch (or there are none); the aggregation
    /// has no meaning left.
    Delete,
    /// New port list with the source's ports moved to the target.
    Rewrite(Vec<SwitchPort>),
    /// Spans several switches, none of them the source.
    Untouched,
}

/// Single-switch aggregations are deleted whichever switch they sit on.
pub fn plan_aggregate(aggregation: &LinkAggregation, source: &str, target: &str) -> AggregateAction {
    let ports = &aggregation.switch_ports;
    let single_switch = ports
        .first()
        .is_none_or(|first| ports.iter().all(|p| p.serial == first.serial));
    if single_switch {
        return AggregateAction::Delete;
    }
    if !ports.iter().any(|p| p.serial == source) {
        return AggregateAction::Untouched;
    }

    let rewritten = ports
        .iter()
        .map(|p| {
            if p.serial == source {
                SwitchPort {
                    serial: target.to_owned(),
                    port_id: p.port_id.clone(),
                }
            } else {
                p.clone()
            }
        })
        .collect();
    AggregateAction::Rewrite(rewritten)
}

/// Switch-specific steps of a replacement from `source` to `target`.
pub struct SwitchOps<'a, D> {
    dashboard: &'a D,
    progress: &'a dyn Progress,
    organization_id: &'a str,
    network: &'a ResolvedNetwork,
    source: &'a str,
    target: &'a str,
}

impl<'a, D: Dashboard> SwitchOps<'a, D> {
    pub fn new(
        dashboard: &'a D,
        progress: &'a dyn Progress,
        organization_id: &'a str,
        network: &'a ResolvedNetwork,
        source: &'a str,
        target: &'a str,
    ) -> Self {
        Self {
            dashboard,
            progress,
            organization_id,
            network,
            source,
            target,
        }
    }

    /// Stack currently holding the source switch.
    pub async fn find_stack(&self) -> Result<Option<String>, CoreError> {
        let stacks = self.dashboard.list_switch_stacks(&self.network.id).await?;
        let stack_id = match_stack(&stacks, self.source).map(str::to_owned);
        if stack_id.is_none() {
            self.progress.report(RmaEvent::NotStacked {
                serial: self.source.to_owned(),
            });
        }
        Ok(stack_id)
    }

    /// Add the target to the stack. Does nothing for an unstacked source.
    pub async fn add_to_stack(&self, stack_id: Option<&str>) -> Result<(), CoreError> {
        let Some(stack_id) = stack_id else {
            return Ok(());
        };
        self.dashboard
            .add_to_switch_stack(&self.network.id, stack_id, self.target)
            .await?;
        self.progress.report(RmaEvent::AddedToStack {
            serial: self.target.to_owned(),
            stack_id: stack_id.to_owned(),
        });
        Ok(())
    }

    /// Remove the source from the stack. Does nothing for an unstacked source.
    pub async fn remove_from_stack(&self, stack_id: Option<&str>) -> Result<(), CoreError> {
        let Some(stack_id) = stack_id else {
            return Ok(());
        };
        self.dashboard
            .remove_from_switch_stack(&self.network.id, stack_id, self.source)
            .await?;
        self.progress.report(RmaEvent::RemovedFromStack {
            serial: self.source.to_owned(),
            stack_id: stack_id.to_owned(),
        });
        Ok(())
    }

    /// Copy the full switch configuration from source to target.
    pub async fn clone_config(&self) -> Result<(), CoreError> {
        self.dashboard
            .clone_switch(self.organization_id, self.source, self.target)
            .await?;
        self.progress.report(RmaEvent::SwitchCloned {
            source: self.source.to_owned(),
            target: self.target.to_owned(),
        });
        Ok(())
    }

    /// Delete single-switch aggregations and point the remaining ones that
    /// use the source at the target.
    pub async fn repair_aggregates(&self) -> Result<(), CoreError> {
        let aggregations = self
            .dashboard
            .list_link_aggregations(&self.network.id)
            .await?;
        debug!(count = aggregations.len(), "link aggregations listed");

        for aggregation in &aggregations {
            match plan_aggregate(aggregation, self.source, self.target) {
                AggregateAction::Untouched => {}
                AggregateAction::Delete => {
                    self.dashboard
                        .delete_link_aggregation(&self.network.id, &aggregation.id)
                        .await?;
                    self.progress.report(RmaEvent::AggregateDeleted {
                        id: aggregation.id.clone(),
                    });
                }
                AggregateAction::Rewrite(ports) => {
                    self.dashboard
                        .update_link_aggregation(&self.network.id, &aggregation.id, &ports)
                        .await?;
                    self.progress.report(RmaEvent::AggregateRewritten {
                        id: aggregation.id.clone(),
                        source: self.source.to_owned(),
                        target: self.target.to_owned(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn port(serial: &str, port_id: &str) -> SwitchPort {
        SwitchPort {
            serial: serial.into(),
            port_id: port_id.into(),
        }
    }

    fn aggregation(ports: Vec<SwitchPort>) -> LinkAggregation {
        LinkAggregation {
            id: "LAG1".into(),
            switch_ports: ports,
            switch_profile_ports: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    fn stack(id: &str, serials: &[&str]) -> SwitchStack {
        SwitchStack {
            id: id.into(),
            name: None,
            serials: serials.iter().map(|s| (*s).to_owned()).collect(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn match_stack_finds_containing_stack() {
        let stacks = [
            stack("S0", &["Q234-ABCD-0001"]),
            stack("S1", &["Q234-ABCD-0002", "Q234-ABCD-1111"]),
        ];
        assert_eq!(match_stack(&stacks, "Q234-ABCD-1111"), Some("S1"));
    }

    #[test]
    fn match_stack_absent_when_unstacked() {
        let stacks = [stack("S0", &["Q234-ABCD-0001"])];
        assert_eq!(match_stack(&stacks, "Q234-ABCD-1111"), None);
        assert_eq!(match_stack(&[], "Q234-ABCD-1111"), None);
    }

    #[test]
    fn aggregate_on_source_only_is_deleted() {
        let agg = aggregation(vec![port("SRC", "1"), port("SRC", "2")]);
        assert_eq!(plan_aggregate(&agg, "SRC", "TGT"), AggregateAction::Delete);
    }

    #[test]
    fn mixed_aggregate_rewrites_only_source_ports() {
        let agg = aggregation(vec![port("SRC", "1"), port("OTHER", "1"), port("SRC", "2")]);
        assert_eq!(
            plan_aggregate(&agg, "SRC", "TGT"),
            AggregateAction::Rewrite(vec![port("TGT", "1"), port("OTHER", "1"), port("TGT", "2")])
        );
    }

    #[test]
    fn single_switch_aggregate_elsewhere_is_deleted() {
        let agg = aggregation(vec![port("PEER", "1"), port("PEER", "2")]);
        assert_eq!(plan_aggregate(&agg, "SRC", "TGT"), AggregateAction::Delete);
    }

    #[test]
    fn portless_aggregate_is_deleted() {
        let agg = aggregation(Vec::new());
        assert_eq!(plan_aggregate(&agg, "SRC", "TGT"), AggregateAction::Delete);
    }

    #[test]
    fn multi_switch_aggregate_without_source_is_untouched() {
        let agg = aggregation(vec![port("A", "1"), port("B", "1")]);
        assert_eq!(plan_aggregate(&agg, "SRC", "TGT"), AggregateAction::Untouched);
    }
}
