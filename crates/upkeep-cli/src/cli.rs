//! Command handlers for the terminal front end
//!
//! [`Cli`] turns parsed arguments into core parameters, calls the [`Upkeep`]
//! façade and renders the markdown (or JSON) result.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use tokio::signal::unix::{signal, SignalKind};
use upkeep_core::{
    display::{CreateResult, GenerationResult, OperationStatus, ScanResult},
    params::{Id, ListPlans},
    Upkeep,
};

use crate::{
    args::{ChecklistCommands, DueArgs, OrderCommands, PlanCommands},
    renderer::TerminalRenderer,
};

pub struct Cli {
    upkeep: Upkeep,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(upkeep: Upkeep, renderer: TerminalRenderer) -> Self {
        Self { upkeep, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self
                    .upkeep
                    .create_plan(&args.into())
                    .await
                    .context("Failed to create plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List(args) => {
                let params = ListPlans::from(&args);
                let plans = self
                    .upkeep
                    .list_plans_summary(&params)
                    .await
                    .context("Failed to list plans")?;
                if args.json {
                    return self.renderer.render_json(&plans);
                }

                let title = if params.all {
                    "All Plans"
                } else if params.inactive {
                    "Inactive Plans"
                } else {
                    "Active Plans"
                };
                self.renderer.render(&format!("# {title}\n\n{plans}"))
            }
            PlanCommands::Show(args) => {
                let id = Id::from(args);
                let plan = self
                    .upkeep
                    .get_plan(&id)
                    .await
                    .context("Failed to get plan")?
                    .ok_or_else(|| anyhow!("Plan with ID {} not found", id.id))?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Update(args) => {
                let result = self
                    .upkeep
                    .update_plan(&args.into())
                    .await
                    .context("Failed to update plan")?;
                self.renderer.render(&result.to_string())
            }
            PlanCommands::Activate(args) => {
                let plan = self
                    .upkeep
                    .activate_plan(&args.into())
                    .await
                    .context("Failed to activate plan")?;
                let status = OperationStatus::success(format!(
                    "Activated plan '{}' (ID: {})",
                    plan.name, plan.id
                ));
                self.renderer.render(&status.to_string())
            }
            PlanCommands::Deactivate(args) => {
                let plan = self
                    .upkeep
                    .deactivate_plan(&args.into())
                    .await
                    .context("Failed to deactivate plan")?;
                let status = OperationStatus::success(format!(
                    "Deactivated plan '{}' (ID: {}). It will not generate work orders until activated.",
                    plan.name, plan.id
                ));
                self.renderer.render(&status.to_string())
            }
            PlanCommands::Delete(args) => {
                let result = self
                    .upkeep
                    .delete_plan(&args.into())
                    .await
                    .context("Failed to delete plan")?;
                self.renderer.render(&result.to_string())
            }
            PlanCommands::Generate(args) => {
                let batch = self
                    .upkeep
                    .generate_work_orders(&args.into())
                    .await
                    .context("Failed to generate work orders")?;
                self.renderer.render(&GenerationResult(batch).to_string())
            }
            PlanCommands::Advance(args) => {
                let id = Id::from(args);
                let plan = self
                    .upkeep
                    .advance_plan(&id)
                    .await
                    .context("Failed to advance plan")?
                    .ok_or_else(|| anyhow!("Plan with ID {} not found", id.id))?;
                let next = plan
                    .next_execution_date
                    .map_or_else(|| "unscheduled".to_string(), |d| d.to_string());
                let status = OperationStatus::success(format!(
                    "Plan '{}' next execution moved to {next}",
                    plan.name
                ));
                self.renderer.render(&status.to_string())
            }
        }
    }

    pub async fn handle_checklist_command(&self, command: ChecklistCommands) -> Result<()> {
        match command {
            ChecklistCommands::Create(args) => {
                let checklist = self
                    .upkeep
                    .create_checklist(&args.into())
                    .await
                    .context("Failed to create checklist")?;
                self.renderer
                    .render(&CreateResult::new(checklist).to_string())
            }
            ChecklistCommands::List(args) => {
                let checklists = self
                    .upkeep
                    .list_checklists()
                    .await
                    .context("Failed to list checklists")?;
                if args.json {
                    return self.renderer.render_json(&checklists);
                }
                self.renderer
                    .render(&format!("# Checklists\n\n{checklists}"))
            }
            ChecklistCommands::Show(args) => {
                let id = Id::from(args);
                let checklist = self
                    .upkeep
                    .get_checklist(&id)
                    .await
                    .context("Failed to get checklist")?
                    .ok_or_else(|| anyhow!("Checklist with ID {} not found", id.id))?;
                self.renderer.render(&checklist.to_string())
            }
            ChecklistCommands::Delete(args) => {
                let result = self
                    .upkeep
                    .delete_checklist(&args.into())
                    .await
                    .context("Failed to delete checklist")?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn handle_order_command(&self, command: OrderCommands) -> Result<()> {
        match command {
            OrderCommands::Create(args) => {
                let order = self
                    .upkeep
                    .create_work_order(&args.into())
                    .await
                    .context("Failed to create work order")?;
                self.renderer.render(&CreateResult::new(order).to_string())
            }
            OrderCommands::List(args) => {
                let orders = self
                    .upkeep
                    .list_work_orders(&(&args).into())
                    .await
                    .context("Failed to list work orders")?;
                if args.json {
                    return self.renderer.render_json(&orders);
                }
                self.renderer
                    .render(&format!("# Work Orders\n\n{orders}"))
            }
            OrderCommands::Show(args) => {
                let id = Id::from(args);
                let order = self
                    .upkeep
                    .get_work_order(&id)
                    .await
                    .context("Failed to get work order")?
                    .ok_or_else(|| anyhow!("Work order with ID {} not found", id.id))?;
                self.renderer.render(&order.to_string())
            }
            OrderCommands::Status(args) => {
                let result = self
                    .upkeep
                    .update_work_order_status(&args.into())
                    .await
                    .context("Failed to update work order status")?;
                self.renderer.render(&result.to_string())
            }
            OrderCommands::Check(args) => {
                let order = self
                    .upkeep
                    .set_checklist_item(&args.into())
                    .await
                    .context("Failed to update checklist item")?;
                self.renderer.render(&order.to_string())
            }
            OrderCommands::Delete(args) => {
                let result = self
                    .upkeep
                    .delete_work_order(&args.into())
                    .await
                    .context("Failed to delete work order")?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    /// Runs the due-plan scan once, or repeatedly until interrupted.
    pub async fn run_due(&self, args: DueArgs) -> Result<()> {
        if !args.watch {
            return self.scan_once().await;
        }

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut ticker = tokio::time::interval(Duration::from_secs(args.interval));

        info!("Watching for due plans every {}s", args.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // A failed pass is retried on the next tick
                    if let Err(e) = self.scan_once().await {
                        warn!("Due-plan scan failed: {e:#}");
                    }
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, stopping watch");
                    break;
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, stopping watch");
                    break;
                }
            }
        }

        Ok(())
    }

    async fn scan_once(&self) -> Result<()> {
        let report = self
            .upkeep
            .run_due_plans()
            .await
            .context("Failed to run due plans")?;
        debug!(
            "Scan generated {} work order(s), skipped {} plan(s)",
            report.total_work_orders(),
            report.failures.len()
        );
        self.renderer.render(&ScanResult(report).to_string())
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let plans = self
            .upkeep
            .list_plans_summary(params)
            .await
            .context("Failed to list plans")?;
        self.renderer
            .render(&format!("# Active Plans\n\n{plans}"))
    }
}
