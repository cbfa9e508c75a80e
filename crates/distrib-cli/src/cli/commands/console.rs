//! Step banners and the end-of-run summary on the terminal.

use distrib_core::catalog::Distro;
use distrib_core::fetch::HeadResult;
use distrib_core::orchestrator::{RunObserver, StepEvent};
use distrib_core::run::RunReport;
use distrib_core::RecipeFailure;

#[derive(Debug, Default)]
pub struct Console {
    current: Option<Distro>,
}

impl RunObserver for Console {
    fn step(&mut self, event: &StepEvent<'_>) {
        if self.current != Some(event.distro) {
            println!("\n== {} ==", event.distro);
            self.current = Some(event.distro);
        }
        println!("  -> {}: {}", event.step, event.detail);
    }

    fn reachable(&mut self, _distro: Distro, _url: &str, head: &HeadResult) {
        println!("     {}", reachable_line(head));
    }

    fn finished(&mut self, distro: Distro, outcome: &Result<(), RecipeFailure>) {
        match outcome {
            Ok(()) => println!("  {} OK", distro),
            Err(failure) => eprintln!("  {} FAILED at {}: {}", distro, failure.step, failure.error),
        }
    }
}

impl Console {
    pub fn summary(&self, report: &RunReport) {
        if report.outcomes.is_empty() {
            println!("Nothing to do.");
            return;
        }
        println!("\nSummary:");
        for (distro, outcome) in &report.outcomes {
            let status = match outcome {
                Ok(()) => "ok".to_string(),
                Err(failure) => format!("FAILED ({})", failure.step),
            };
            println!("  {:<20} {}", distro.name(), status);
        }
        let failed = report.failed_count();
        println!(
            "{} succeeded, {} failed",
            report.outcomes.len() - failed,
            failed
        );
    }
}

fn reachable_line(head: &HeadResult) -> String {
    let size = head
        .content_length
        .map_or_else(|| "size unknown".to_string(), |n| format!("{} bytes", n));
    match &head.last_modified {
        Some(date) => format!("{}, {}, modified {}", head.status, size, date),
        None => format!("{}, {}", head.status, size),
    }
}
