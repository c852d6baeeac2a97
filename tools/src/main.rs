//! journey-runner: headless front end for the loan calculator and the
//! financial journey game.
//!
//! Usage:
//!   journey-runner --seed 12345 --income 5000 --score 650 --strategy cycle
//!   journey-runner --seed 12345 --ipc-mode
//!   journey-runner --builtin --report loan_report.txt

mod report;

use anyhow::{Context, Result};
use loansim_core::{
    eligibility::{default_credit_score_buckets, default_income_buckets},
    estimate_loan, heatmap_grid, suggested_documents, ApplicantProfile, Decision, GameConfig,
    GameState, Journey, JourneyEvent, JourneyPhase, LiteracyQuiz, MarketEvent, Occupation,
    RngBank, RngSlot, SimRng, SimulationParameters,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use uuid::Uuid;

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Estimate { profile: ApplicantProfile },
    Amortize { params: SimulationParameters },
    Schemes { occupation: Occupation },
    Report { profile: ApplicantProfile },
    StartJourney { session_id: Option<Uuid> },
    Advance { session_id: Uuid, decision: Decision },
    GetState { session_id: Uuid },
    Summary { session_id: Uuid },
    EndSession { session_id: Uuid },
    Quiz,
    AnswerQuiz { level: usize, option: usize },
    Quit,
}

#[derive(Serialize)]
struct AdvanceReply<'a> {
    session_id: Uuid,
    events:     Vec<JourneyEvent>,
    /// Catalog entry for the event drawn this month.
    market:     Option<&'a MarketEvent>,
    state:      &'a GameState,
}

/// One independent game per session id.
struct Session {
    journey: Journey,
    rng:     SimRng,
}

struct Runner {
    config:          GameConfig,
    quiz:            LiteracyQuiz,
    master_seed:     u64,
    bank:            RngBank,
    scheme_rng:      SimRng,
    sessions:        HashMap<Uuid, Session>,
    sessions_opened: u64,
}

impl Runner {
    fn new(config: GameConfig, quiz: LiteracyQuiz, master_seed: u64) -> Self {
        let bank = RngBank::new(master_seed);
        Self {
            scheme_rng: bank.for_slot(RngSlot::Schemes),
            bank,
            config,
            quiz,
            master_seed,
            sessions: HashMap::new(),
            sessions_opened: 0,
        }
    }

    /// Each session gets its own market stream, keyed by opening order.
    /// Reopening an existing id restarts that session.
    fn open_session(&mut self, session_id: Uuid) -> Result<JourneyEvent> {
        let mut journey = Journey::new(&self.config)?;
        let rng = self
            .bank
            .session(self.sessions_opened)
            .for_slot(RngSlot::MarketEvents);
        self.sessions_opened += 1;
        let started = journey.start();
        self.sessions.insert(session_id, Session { journey, rng });
        log::info!("session {session_id} opened ({} active)", self.sessions.len());
        Ok(started)
    }

    fn session(&mut self, session_id: &Uuid) -> Result<&mut Session> {
        self.sessions
            .get_mut(session_id)
            .with_context(|| format!("unknown session {session_id}"))
    }

    fn handle(&mut self, cmd: IpcCommand) -> Result<serde_json::Value> {
        let reply = match cmd {
            IpcCommand::Quit => serde_json::json!({ "ok": true }),
            IpcCommand::Estimate { profile } => {
                let estimate = estimate_loan(&profile)?;
                let heatmap = heatmap_grid(
                    &profile,
                    &default_credit_score_buckets(),
                    &default_income_buckets(),
                )?;
                serde_json::json!({
                    "estimate": estimate,
                    "risk_band": loansim_core::RiskBand::from_credit_score(profile.credit_score),
                    "curve": loansim_core::sensitivity_curve(
                        &profile,
                        &loansim_core::eligibility::default_score_samples(),
                    )?,
                    "heatmap": heatmap,
                    "simulation": SimulationParameters::seeded_from(&profile, &estimate),
                })
            }
            IpcCommand::Amortize { params } => serde_json::json!({
                "impact": params.analyze(),
                "term_series": params.term_series(),
                "savings_schedule": params.savings_schedule(),
            }),
            IpcCommand::Schemes { occupation } => {
                let schemes = self.config.schemes.recommend(occupation, &mut self.scheme_rng)?;
                serde_json::json!({ "schemes": schemes })
            }
            IpcCommand::Report { profile } => {
                let estimate = estimate_loan(&profile)?;
                let schemes = self.config.schemes.recommend(profile.occupation, &mut self.scheme_rng)?;
                serde_json::json!({
                    "report": report::loan_report(&profile, &estimate, &schemes, chrono::Local::now()),
                    "documents": suggested_documents(profile.loan_type, profile.occupation),
                })
            }
            IpcCommand::StartJourney { session_id } => {
                let session_id = session_id.unwrap_or_else(Uuid::new_v4);
                let event = self.open_session(session_id)?;
                serde_json::json!({ "session_id": session_id, "events": [event] })
            }
            IpcCommand::Advance { session_id, decision } => {
                let session = self.session(&session_id)?;
                let events = session.journey.advance_month(decision, &mut session.rng)?;
                let journey = &session.journey;
                let market = journey
                    .state()
                    .event_history()
                    .last()
                    .and_then(|name| journey.market().find(name));
                serde_json::to_value(AdvanceReply {
                    session_id,
                    events,
                    market,
                    state: journey.state(),
                })?
            }
            IpcCommand::GetState { session_id } => {
                let session = self.session(&session_id)?;
                serde_json::json!({ "session_id": session_id, "state": session.journey.state() })
            }
            IpcCommand::Summary { session_id } => {
                let session = self.session(&session_id)?;
                serde_json::json!({ "session_id": session_id, "summary": session.journey.summarize()? })
            }
            IpcCommand::EndSession { session_id } => {
                let removed = self.sessions.remove(&session_id).is_some();
                serde_json::json!({ "session_id": session_id, "removed": removed })
            }
            IpcCommand::Quiz => {
                let levels: Vec<_> = self
                    .quiz
                    .levels
                    .iter()
                    .enumerate()
                    .map(|(i, l)| {
                        serde_json::json!({
                            "level": i + 1,
                            "title": l.title,
                            "question": l.question,
                            "options": l.options,
                        })
                    })
                    .collect();
                serde_json::json!({ "levels": levels })
            }
            IpcCommand::AnswerQuiz { level, option } => {
                serde_json::to_value(self.quiz.answer(level, option)?)?
            }
        };
        Ok(reply)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = str_arg(&args, "--data-dir").unwrap_or("./data");

    let config = if args.iter().any(|a| a == "--builtin") || !Path::new(data_dir).is_dir() {
        log::warn!("using builtin catalogs (data dir '{data_dir}' not used)");
        let config = GameConfig::builtin();
        config.validate()?;
        config
    } else {
        GameConfig::load(data_dir)?
    };
    let quiz = LiteracyQuiz::builtin();
    quiz.validate()?;

    let mut runner = Runner::new(config, quiz, seed);
    if ipc_mode {
        run_ipc_loop(&mut runner)
    } else {
        run_once(&mut runner, &args)
    }
}

fn run_ipc_loop(runner: &mut Runner) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let (reply, quit) = respond(runner, &buffer);
        writeln!(stdout, "{}", reply)?;
        stdout.flush()?;

        if quit {
            break;
        }
    }
    Ok(())
}

/// One request line in, one reply out. Any failure becomes
/// `{"error": ...}` and leaves the other sessions untouched.
fn respond(runner: &mut Runner, line: &str) -> (serde_json::Value, bool) {
    let cmd: IpcCommand = match serde_json::from_str(line) {
        Ok(c) => c,
        Err(e) => return (serde_json::json!({ "error": e.to_string() }), false),
    };
    let quit = matches!(cmd, IpcCommand::Quit);
    let reply = runner
        .handle(cmd)
        .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }));
    (reply, quit)
}

fn run_once(runner: &mut Runner, args: &[String]) -> Result<()> {
    let profile = ApplicantProfile {
        monthly_income: parse_arg(args, "--income", 5000.0),
        age: parse_arg(args, "--age", 30),
        loan_term_years: parse_arg(args, "--term", 20),
        credit_score: parse_arg(args, "--score", 650),
        employment_status: str_arg(args, "--employment").unwrap_or("Employed").parse()?,
        loan_type: str_arg(args, "--loan-type").unwrap_or("Home Loan").parse()?,
        occupation: str_arg(args, "--occupation").unwrap_or("Salaried").parse()?,
    };
    let strategy = str_arg(args, "--strategy").unwrap_or("cycle");
    let invest_percent = parse_arg(args, "--invest-percent", 50.0);

    println!("Loan Predictor: journey-runner");
    println!("  seed:      {}", runner.master_seed);
    println!("  strategy:  {strategy}");
    println!();

    let estimate = estimate_loan(&profile)?;
    let schemes = runner
        .config
        .schemes
        .recommend(profile.occupation, &mut runner.scheme_rng)?;
    let report_text = report::loan_report(&profile, &estimate, &schemes, chrono::Local::now());
    print!("{report_text}");
    println!();
    println!("=== INSIGHTS ===");
    print!("{}", report::insights(&profile, &estimate));
    println!();
    println!("=== DOCUMENTS TO PREPARE ===");
    for doc in suggested_documents(profile.loan_type, profile.occupation) {
        println!("  - {doc}");
    }

    let mut params = SimulationParameters::seeded_from(&profile, &estimate);
    params.annual_interest_percent = parse_arg(args, "--rate", params.annual_interest_percent);
    println!();
    println!("=== LOAN IMPACT ({:.1}% over {} years) ===", params.annual_interest_percent, params.term_years);
    print!("{}", report::loan_impact(&params.analyze()));
    println!();
    print!("{}", report::term_table(&params.term_series()));

    if let Some(path) = str_arg(args, "--report") {
        std::fs::write(path, &report_text).with_context(|| format!("Cannot write {path}"))?;
        println!("\nReport written to: {path}");
    }

    println!();
    println!("=== LOAN LITERACY CHALLENGE ===");
    print!("{}", report::literacy_quiz(&runner.quiz));

    let session_id = Uuid::new_v4();
    runner.open_session(session_id)?;
    let session = runner.session(&session_id)?;
    let mut month = 0u32;
    while session.journey.phase() == JourneyPhase::InProgress {
        let decision = pick_decision(strategy, month, invest_percent)?;
        session.journey.advance_month(decision, &mut session.rng)?;
        month += 1;
    }

    let journey = &session.journey;
    let state = journey.state();
    println!();
    println!("=== JOURNEY ({} months) ===", journey.config().months);
    for (i, (event, choice)) in state
        .event_history()
        .iter()
        .zip(state.choice_history())
        .enumerate()
    {
        println!(
            "  {:>2}  {:<8} {:<20} ${:>14}",
            i + 1,
            choice.to_string(),
            event,
            report::format_money(state.net_worth_history()[i + 1])
        );
    }
    println!();
    println!("=== MARKET EVENTS ===");
    for event in &journey.market().events {
        let seen = state.event_history().iter().filter(|name| **name == event.name).count();
        if seen > 0 {
            println!("  {} x{seen}: {}", event.name, event.description);
        }
    }
    println!();
    println!("=== JOURNEY SUMMARY ===");
    print!("{}", report::journey_summary(&journey.summarize()?));
    Ok(())
}

fn pick_decision(strategy: &str, month: u32, invest_percent: f64) -> Result<Decision> {
    let decision = match strategy {
        "invest" => Decision::Invest { percent: invest_percent },
        "save" => Decision::Save,
        "borrow" => Decision::Borrow,
        "cycle" => match month % 3 {
            0 => Decision::Invest { percent: invest_percent },
            1 => Decision::Save,
            _ => Decision::Borrow,
        },
        other => anyhow::bail!("unknown strategy '{other}' (invest|save|borrow|cycle)"),
    };
    Ok(decision)
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
