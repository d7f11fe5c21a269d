use std::rc::Rc;
use std::time::Duration;

use clap::ArgMatches;
use serde::Serialize;
use tracing::{error, info, warn};

use pagepulse_core::{
    BroadcastPolicy, BroadcastReport, PageShell, PulseConfig, RefreshError, ShellError, events,
};

use crate::script::{Step, parse_steps};
use crate::table;
use crate::trace::{FaultyRefresher, TraceEntry, TraceLog, TracedPoller};

pub(crate) fn handle_simulate_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let inputs: Vec<&str> = matches
        .get_many::<String>("steps")
        .ok_or("No steps given")?
        .map(String::as_str)
        .collect();

    info!(
        event = "cli.simulate_started",
        steps = inputs.len(),
        json_output = json_output
    );

    let steps = match parse_steps(inputs.iter().copied()) {
        Ok(steps) => steps,
        Err(e) => {
            eprintln!("{}", e);
            error!(event = "cli.simulate_step_invalid", input = e.input.as_str());
            return Err(e.into());
        }
    };

    let config = match PulseConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            error!(event = "cli.simulate_config_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let policy = match matches.get_one::<String>("policy") {
        Some(value) => value.parse::<BroadcastPolicy>()?,
        None => config.broadcast_policy(),
    };
    let interval = matches
        .get_one::<u64>("interval")
        .map(|secs| Duration::from_secs(*secs))
        .unwrap_or_else(|| config.interval());

    let mut simulation = Simulation::new(policy, interval);
    simulation.run(&steps);
    let output = simulation.into_output(steps.len());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        table::print_trace(&output.trace);
        println!(
            "{} step(s), {} refresher(s) registered, policy: {}",
            output.steps, output.registered, output.policy
        );
    }

    info!(
        event = "cli.simulate_completed",
        steps = output.steps,
        trace_entries = output.trace.len()
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub(crate) struct SimulationOutput {
    pub policy: String,
    pub interval_secs: u64,
    pub steps: usize,
    /// Refreshers still registered when the script ended.
    pub registered: usize,
    pub page: Option<String>,
    pub trace: Vec<TraceEntry>,
}

/// A page shell plus the traced pollers registered through it.
pub(crate) struct Simulation {
    shell: PageShell,
    pollers: Vec<Rc<TracedPoller>>,
    interval: Duration,
    log: TraceLog,
}

impl Simulation {
    pub fn new(policy: BroadcastPolicy, interval: Duration) -> Self {
        Self {
            shell: PageShell::new(policy),
            pollers: Vec::new(),
            interval,
            log: TraceLog::new(),
        }
    }

    /// Run every step; a failing step is traced and the script continues.
    pub fn run(&mut self, steps: &[Step]) {
        for (index, step) in steps.iter().enumerate() {
            self.log.set_step(index + 1);
            if let Err(e) = self.apply(step) {
                warn!(
                    event = "cli.simulate_step_failed",
                    step = index + 1,
                    error_code = pagepulse_core::PulseError::error_code(&e),
                    error = %e
                );
                self.log.record("error", None, e.to_string());
            }
        }
    }

    pub fn into_output(self, steps: usize) -> SimulationOutput {
        SimulationOutput {
            policy: self.shell.registry().policy().to_string(),
            interval_secs: self.interval.as_secs(),
            steps,
            registered: self.shell.registry().len(),
            page: self.shell.current_page().map(str::to_string),
            trace: self.log.entries(),
        }
    }

    fn apply(&mut self, step: &Step) -> Result<(), ShellError> {
        match step {
            Step::Page(name) => {
                self.shell.enter_page(name.as_str());
                self.pollers.clear();
                self.log.record("page", Some(name.as_str()), "entered");
            }
            Step::Add(name) => {
                let poller = Rc::new(TracedPoller::new(name, self.interval, &self.log));
                self.shell.registry_mut().add_refresher(poller.clone());
                self.pollers.push(poller);
                self.log.record("register", Some(name.as_str()), "registered");
            }
            Step::Main(name) => {
                let poller = Rc::new(TracedPoller::new(name, self.interval, &self.log));
                self.shell.registry_mut().add_main_refresher(poller.clone());
                self.pollers.push(poller);
                self.log.record("register", Some(name.as_str()), "registered as main");
            }
            Step::Fail(name) => {
                let faulty = Rc::new(FaultyRefresher::new(name, &self.log));
                self.shell.registry_mut().add_refresher(faulty);
                self.log.record("register", Some(name.as_str()), "registered (faulty)");
            }
            Step::Disable => {
                let report = self.shell.registry().disable_ajax()?;
                self.record_report(&report);
            }
            Step::Enable => {
                let report = self.shell.registry().enable_ajax()?;
                self.record_report(&report);
            }
            Step::ModalOpen => {
                let report = self.shell.open_modal()?;
                self.record_modal("modal-open", report.as_ref());
            }
            Step::ModalClose => {
                let report = self.shell.close_modal()?;
                self.record_modal("modal-close", report.as_ref());
            }
            Step::After(fragment) => {
                let main = self.shell.registry().main();
                let owner = main.fragment_id().unwrap_or("none").to_string();
                self.log
                    .record("after", Some(fragment.as_str()), format!("main refresher: {}", owner));

                let log = self.log.clone();
                let target = fragment.clone();
                main.after_refresh_of(
                    fragment,
                    Box::new(move || log.record("callback", Some(target.as_str()), "ran")),
                );
            }
            Step::Cycle(fragment) => {
                let poller = self
                    .pollers
                    .iter()
                    .rev()
                    .find(|p| p.name() == fragment.as_str())
                    .ok_or_else(|| RefreshError::UnknownFragment {
                        fragment: fragment.clone(),
                    })?;
                poller.complete_cycle()?;
            }
            Step::Clear => {
                let removed = self.shell.registry().len();
                self.shell.registry_mut().clear();
                self.pollers.clear();
                self.log
                    .record("clear", None, format!("{} refresher(s) removed", removed));
            }
        }
        Ok(())
    }

    fn record_report(&self, report: &BroadcastReport) {
        self.log.record(
            "broadcast",
            None,
            format!(
                "{}: {} invoked, {} failed",
                report.kind,
                report.invoked,
                report.failures.len()
            ),
        );
    }

    fn record_modal(&self, action: &str, report: Option<&BroadcastReport>) {
        let depth = self.shell.modal_depth();
        match report {
            Some(report) => {
                self.log
                    .record(action, None, format!("depth {}", depth));
                self.record_report(report);
            }
            None => self
                .log
                .record(action, None, format!("depth {}, nested", depth)),
        }
    }
}
