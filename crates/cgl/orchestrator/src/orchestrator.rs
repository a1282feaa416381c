use crate::config::OrchestratorConfig;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::hooks::{CycleContext, CycleHooks, WorkOutput};
use crate::report::{RunStatus, TerminationReport, REPORT_FILE};
use cgl_audit::{AuditTrail, EventType, Severity, AUDIT_TRAIL_FILE};
use cgl_cost::CostEvaluator;
use cgl_decision::DecisionEngine;
use cgl_state_lock::{StateLockChain, STATE_CHAIN_FILE};
use cgl_types::storage::write_json;
use cgl_types::{CycleMetrics, ExternalConstraints, InternalSignals};
use cgl_verification::{Gate, VerificationGateSystem};
use chrono::Utc;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

/// Inputs fixed for the whole run and locked at every cycle.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub parameters: Value,
    pub assumptions: Value,
    /// Feeds the `assumptions_verified` gate.
    pub assumptions_verified: bool,
}

impl RunPlan {
    /// Plan with verified assumptions.
    pub fn new(parameters: Value, assumptions: Value) -> Self {
        Self {
            parameters,
            assumptions,
            assumptions_verified: true,
        }
    }

    pub fn unverified(mut self) -> Self {
        self.assumptions_verified = false;
        self
    }
}

/// Owns every loop component and is the only thing that mutates them.
pub struct CycleOrchestrator {
    config: OrchestratorConfig,
    run_id: Uuid,
    state_chain: StateLockChain,
    gates: VerificationGateSystem,
    cost: CostEvaluator,
    decisions: DecisionEngine,
    audit: AuditTrail,
    next_sequence: u64,
    /// Last completed cycle and its output; feeds the next cycle's gates.
    previous: Option<(u64, WorkOutput)>,
}

impl CycleOrchestrator {
    /// Fresh components built from `config`.
    ///
    /// With a storage directory, any chain files already in it are replaced
    /// by this run's chains on the first write.
    pub fn new(config: OrchestratorConfig) -> Self {
        let (state_chain, audit) = match &config.storage_dir {
            Some(dir) => (
                StateLockChain::with_storage(dir.join(STATE_CHAIN_FILE)),
                AuditTrail::with_storage(dir.join(AUDIT_TRAIL_FILE)),
            ),
            None => (StateLockChain::new(), AuditTrail::new()),
        };

        Self {
            run_id: Uuid::new_v4(),
            gates: VerificationGateSystem::new(config.gates.clone()),
            cost: CostEvaluator::new(config.cost.clone()),
            decisions: DecisionEngine::new(config.decision.clone()),
            state_chain,
            audit,
            config,
            next_sequence: 0,
            previous: None,
        }
    }

    /// Add a gate to the default battery.
    pub fn with_gate(mut self, gate: impl Gate + 'static) -> Self {
        self.gates = self.gates.with_gate(gate);
        self
    }

    /// Run cycles until a terminal decision or the cycle cap.
    ///
    /// Calling `run` again resumes at the next sequence, gated on the last
    /// completed cycle's output. Once a terminal decision has been made the
    /// loop stays closed and further calls return
    /// [`OrchestratorError::Terminated`].
    ///
    /// Only persistence and hashing failures abort the run.
    pub fn run(
        &mut self,
        plan: &RunPlan,
        hooks: &mut impl CycleHooks,
    ) -> OrchestratorResult<TerminationReport> {
        if let Some(reason) = self.decisions.termination_reason() {
            return Err(OrchestratorError::Terminated(reason.to_string()));
        }

        let started = Instant::now();
        let max_cycles = u64::from(self.config.max_cycles);
        let mut termination: Option<String> = None;

        info!(run_id = %self.run_id, max_cycles, "closed loop starting");

        while self.next_sequence < max_cycles {
            let sequence = self.next_sequence;
            let cycle_id = format!("CYC-{:04}", sequence);
            let elapsed = started.elapsed().as_secs_f64();

            // 1. Lock the cycle's inputs.
            let inputs = hooks.external_inputs(sequence);
            let locked_inputs = serde_json::to_value(&inputs)?;
            self.emit(
                EventType::CycleStarted,
                Some(cycle_id.as_str()),
                json!({"sequence": sequence, "elapsed_seconds": elapsed}),
                Severity::Info,
            )?;
            let lock = self.state_chain.lock_initial_state(
                cycle_id.as_str(),
                plan.parameters.clone(),
                plan.assumptions.clone(),
                locked_inputs,
            )?;
            let lock_payload = json!({
                "sequence": lock.sequence,
                "state_hash": lock.state_hash,
                "previous_hash": lock.previous_hash,
            });
            self.emit(EventType::StateLocked, Some(cycle_id.as_str()), lock_payload, Severity::Info)?;

            // 2. Gates over the previous cycle's measurements.
            let metrics = match &self.previous {
                Some((prev_seq, output)) => hooks.metrics(*prev_seq, output),
                None => CycleMetrics::baseline(),
            };
            let verification = self.gates.evaluate_all(&metrics, plan.assumptions_verified);
            self.emit(
                EventType::VerificationCompleted,
                Some(cycle_id.as_str()),
                json!({
                    "summary": verification.summary,
                    "failed_gates": verification.failed_gates(),
                }),
                if verification.is_blocked() {
                    Severity::Warning
                } else {
                    Severity::Info
                },
            )?;

            // 3. Decide before doing any work.
            let external = ExternalConstraints {
                business_objective_met: inputs.business_objective_met,
                time_budget_seconds: self.config.time_budget_seconds,
                time_elapsed_seconds: elapsed,
                resource_budget_units: self.config.resource_budget_units,
                resource_consumed_units: self.cost.total_resource_units(),
                max_cycles: self.config.max_cycles,
                current_cycle: u32::try_from(sequence).unwrap_or(u32::MAX),
                manual_stop_requested: inputs.manual_stop,
            };
            // Rate over the whole history; an unblocked report on its own is always 1.0.
            let internal = InternalSignals::from_metrics(&metrics, Some(self.gates.pass_rate()));
            let decision = self.decisions.make_decision(
                cycle_id.as_str(),
                &external,
                &internal,
                verification.is_blocked(),
            );
            self.emit(
                EventType::DecisionMade,
                Some(cycle_id.as_str()),
                json!({
                    "decision": decision.decision,
                    "reason": decision.reason,
                    "warnings": decision.warnings,
                    "adjustments": decision.adjustments,
                    "convergence_indicator": internal.convergence_indicator(),
                }),
                if decision.is_terminal() {
                    Severity::Warning
                } else {
                    Severity::Info
                },
            )?;

            if decision.is_terminal() {
                self.emit(
                    EventType::CycleTerminated,
                    Some(cycle_id.as_str()),
                    json!({"decision": decision.decision, "reason": decision.reason}),
                    Severity::Info,
                )?;
                termination = Some(decision.reason);
                break;
            }

            // 4. Work. A failure is audited and replaced by an error output.
            let ctx = CycleContext::new(
                cycle_id.as_str(),
                sequence,
                plan.parameters.clone(),
                metrics,
                plan.assumptions_verified,
                decision.decision,
            );
            let output = match hooks.execute(&ctx) {
                Ok(output) => output,
                Err(e) => {
                    error!(cycle_id = %cycle_id, error = %e, "cycle work failed");
                    self.emit(
                        EventType::ErrorOccurred,
                        Some(cycle_id.as_str()),
                        json!({"error": e.to_string()}),
                        Severity::Error,
                    )?;
                    json!({"status": "error", "error": e.to_string()})
                }
            };

            // 5. Cost accounting.
            let cost = hooks.cost(sequence, &output);
            let benefit = hooks.benefit(sequence, &output);
            let snapshot = self.cost.record_cycle(cost, benefit);
            self.emit(
                EventType::CostRecorded,
                Some(cycle_id.as_str()),
                serde_json::to_value(&snapshot)?,
                Severity::Info,
            )?;

            // 6. Close the cycle.
            if !decision.adjustments.is_empty() {
                self.emit(
                    EventType::AdjustmentApplied,
                    Some(cycle_id.as_str()),
                    json!({"decision": decision.decision, "adjustments": decision.adjustments}),
                    Severity::Info,
                )?;
            }
            self.emit(
                EventType::CycleCompleted,
                Some(cycle_id.as_str()),
                json!({
                    "sequence": sequence,
                    "cost": snapshot.total_cost,
                    "benefit": snapshot.benefit.benefit_score,
                    "roi": snapshot.roi,
                }),
                Severity::Info,
            )?;
            info!(
                cycle_id = %cycle_id,
                decision = %decision.decision,
                roi = snapshot.roi,
                "cycle completed"
            );

            self.previous = Some((sequence, output));
            self.next_sequence += 1;
        }

        self.finish(termination)
    }

    fn finish(&mut self, termination: Option<String>) -> OrchestratorResult<TerminationReport> {
        let state_chain_integrity = self.state_chain.verify_chain_integrity();
        let audit_chain_integrity = self.audit.verify_integrity();
        let intact = state_chain_integrity.valid && audit_chain_integrity.valid;
        self.emit(
            EventType::ChainValidated,
            None,
            json!({
                "state_chain_valid": state_chain_integrity.valid,
                "state_chain_errors": state_chain_integrity.errors,
                "audit_chain_valid": audit_chain_integrity.valid,
                "audit_chain_errors": audit_chain_integrity.errors,
            }),
            if intact { Severity::Info } else { Severity::Error },
        )?;

        let (status, termination_reason) = match termination {
            Some(reason) => (RunStatus::Terminated, reason),
            None => (
                RunStatus::MaxCyclesReached,
                format!("max cycles reached ({})", self.config.max_cycles),
            ),
        };

        let report = TerminationReport {
            run_id: self.run_id,
            status,
            termination_reason,
            cycles_completed: self.next_sequence,
            state_chain_integrity,
            audit_chain_integrity,
            cost_summary: self.cost.summary(),
            decision_history_length: self.decisions.history().len(),
            verification_history_length: self.gates.history().len(),
            timestamp: Utc::now(),
        };

        if let Some(dir) = &self.config.storage_dir {
            write_json(&dir.join(REPORT_FILE), &report)?;
        }

        if intact {
            info!(
                run_id = %report.run_id,
                status = ?report.status,
                cycles = report.cycles_completed,
                reason = %report.termination_reason,
                "closed loop finished"
            );
        } else {
            error!(run_id = %report.run_id, "closed loop finished with broken chains");
        }
        Ok(report)
    }

    fn emit(
        &mut self,
        event_type: EventType,
        cycle_id: Option<&str>,
        payload: Value,
        severity: Severity,
    ) -> OrchestratorResult<()> {
        self.audit
            .record(event_type, cycle_id, payload, severity, &self.config.actor)?;
        Ok(())
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn state_chain(&self) -> &StateLockChain {
        &self.state_chain
    }

    pub fn verification(&self) -> &VerificationGateSystem {
        &self.gates
    }

    pub fn cost_evaluator(&self) -> &CostEvaluator {
        &self.cost
    }

    pub fn decision_engine(&self) -> &DecisionEngine {
        &self.decisions
    }

    pub fn audit_trail(&self) -> &AuditTrail {
        &self.audit
    }
}
