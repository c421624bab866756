use std::iter::FusedIterator;

use crate::error::SimulationError;
use crate::process::Process;
use crate::request::{Discipline, SimulationRequest};
use crate::scheduler::Scheduler;
use crate::schedulers::{FcfsScheduler, MultiLevelScheduler, RoundRobinScheduler, SjfPreemptiveScheduler};
use crate::step::{CpuSlot, ReadyView, Snapshot, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Running,
    FinalStats,
    Terminal,
    Done,
}

/// One simulation run
///
/// A lazy, finite sequence of [`Step`]s: every call to `next` advances the
/// clock to the next decision point and returns the state at that point.
/// Once every process has completed the run yields the final statistics,
/// then a terminal idle snapshot, then nothing.
///
/// A run owns all of its state. Building two runs from the same request
/// yields two independent process sets.
pub struct Simulation {
    scheduler: Box<dyn Scheduler>,
    discipline: Discipline,
    phase: Phase,
}

impl Simulation {
    /// Creates a run of `discipline` over `processes`
    pub fn new(discipline: Discipline, processes: Vec<Process>) -> Result<Simulation, SimulationError> {
        discipline.validate(&processes)?;
        let count = processes.len();

        let scheduler: Box<dyn Scheduler> = match discipline {
            Discipline::Fcfs => Box::new(FcfsScheduler::new(processes)),
            Discipline::SjfPreemptive => Box::new(SjfPreemptiveScheduler::new(processes)),
            Discipline::RoundRobin { quantum } => Box::new(RoundRobinScheduler::new(quantum, processes)),
            Discipline::MultiLevel => Box::new(MultiLevelScheduler::new(processes)),
        };

        log::info!(
            "starting {} simulation with {} processes",
            scheduler.name(),
            count
        );

        Ok(Simulation {
            scheduler,
            discipline,
            phase: Phase::Running,
        })
    }

    /// Creates a run from a request, with freshly built processes
    pub fn from_request(request: &SimulationRequest) -> Result<Simulation, SimulationError> {
        let discipline = request.discipline()?;
        let processes = request.build_processes()?;
        Simulation::new(discipline, processes)
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    fn terminal_snapshot(&self) -> Snapshot {
        let info = self.scheduler.info();

        Snapshot {
            time: info.get_timestamp(),
            cpu: CpuSlot::Idle,
            ready: ReadyView::Queue(Vec::new()),
            completed: info.completed_snapshots(),
            event: None,
        }
    }
}

impl Iterator for Simulation {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            match self.phase {
                Phase::Running => match self.scheduler.tick() {
                    Some(snapshot) => return Some(Step::Progress(snapshot)),
                    None => self.phase = Phase::FinalStats,
                },
                Phase::FinalStats => {
                    self.phase = Phase::Terminal;
                    let final_stats = self.scheduler.info().completed_snapshots();
                    log::info!(
                        "{} simulation finished at t={} with {} completed processes",
                        self.scheduler.name(),
                        self.scheduler.info().get_timestamp(),
                        final_stats.len()
                    );
                    return Some(Step::FinalStats { final_stats });
                }
                Phase::Terminal => {
                    self.phase = Phase::Done;
                    return Some(Step::Terminal(self.terminal_snapshot()));
                }
                Phase::Done => return None,
            }
        }
    }
}

impl FusedIterator for Simulation {}
