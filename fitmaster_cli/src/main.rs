use clap::{Args, Parser, Subcommand};
use fitmaster_core::catalog::counts_by_muscle_group;
use fitmaster_core::session::ActiveWorkoutExercise;
use fitmaster_core::timer::format_time;
use fitmaster_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "fitmaster")]
#[command(about = "Workout generator and set-by-set training tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Act as this user (overrides [user] id in the config file)
    #[arg(long, global = true)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage your exercise catalog
    #[command(subcommand)]
    Exercise(ExerciseCommand),

    /// Generate a workout from selected muscle groups
    Generate {
        /// Muscle group and exercise count, e.g. `chest=2` (repeatable)
        #[arg(long = "group", value_parser = parse_group_count, required = true)]
        groups: Vec<(MuscleGroup, Option<u32>)>,

        /// Swap the Nth exercise (1-based) for another one (repeatable)
        #[arg(long)]
        replace: Vec<usize>,

        /// Save the workout as the active workout
        #[arg(long)]
        start: bool,

        /// Seed for reproducible generation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Work through the active workout set by set
    Workout {
        /// Complete every set and finish without prompting (for testing)
        #[arg(long)]
        auto_complete: bool,

        /// Weight recorded for every set when auto-completing
        #[arg(long, requires = "auto_complete")]
        weight: Option<f64>,
    },

    /// Show exercise and workout totals (default)
    Stats,
}

#[derive(Subcommand)]
enum ExerciseCommand {
    /// Add a new exercise
    Add(ExerciseForm),

    /// List exercises, newest first
    List {
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        group: Option<MuscleGroup>,

        #[arg(long)]
        load: Option<LoadType>,
    },

    /// Replace the fields of an existing exercise
    Edit {
        id: Uuid,

        #[command(flatten)]
        form: ExerciseForm,
    },

    /// Delete an exercise
    Delete { id: Uuid },
}

#[derive(Args)]
struct ExerciseForm {
    #[arg(long)]
    name: String,

    #[arg(long)]
    group: MuscleGroup,

    #[arg(long)]
    load: LoadType,

    #[arg(long = "type")]
    exercise_type: ExerciseType,

    #[arg(long, default_value_t = 3)]
    sets: u32,

    #[arg(long, default_value_t = 10)]
    reps: u32,

    #[arg(long, default_value = "")]
    technique: String,

    #[arg(long)]
    video_url: Option<String>,

    #[arg(long)]
    machine_name: Option<String>,

    #[arg(long)]
    machine_settings: Option<String>,

    #[arg(long)]
    comment: Option<String>,
}

impl From<ExerciseForm> for NewExercise {
    fn from(form: ExerciseForm) -> Self {
        let mut exercise = NewExercise::new(form.name, form.group, form.load, form.exercise_type);
        exercise.sets = form.sets;
        exercise.reps = form.reps;
        exercise.technique = form.technique;
        exercise.video_url = form.video_url;
        exercise.machine_name = form.machine_name;
        exercise.machine_settings = form.machine_settings;
        exercise.comment = form.comment;
        exercise
    }
}

fn parse_group_count(s: &str) -> std::result::Result<(MuscleGroup, Option<u32>), String> {
    let (group, count) = match s.split_once('=') {
        Some((group, count)) => {
            let count = count
                .trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid count '{}': {}", count, e))?;
            (group, Some(count))
        }
        None => (s, None),
    };
    let group = group.parse::<MuscleGroup>().map_err(|e| e.to_string())?;
    Ok((group, count))
}

fn main() {
    fitmaster_core::logging::init_with_level("warn");

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        if matches!(e, Error::NotAuthenticated) {
            eprintln!("Pass --user <ID> or set [user] id in {:?}", Config::default_config_path());
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let identity = StaticIdentity::new(cli.user.map(UserId::new).or_else(|| config.user_id()));

    let ctx = UserContext::new(identity.current_user()?);
    let store = JsonStore::new(data_dir);

    match cli.command {
        Some(Commands::Exercise(command)) => cmd_exercise(store, &ctx, command),
        Some(Commands::Generate {
            groups,
            replace,
            start,
            seed,
        }) => cmd_generate(store, &ctx, &config, groups, replace, start, seed),
        Some(Commands::Workout {
            auto_complete,
            weight,
        }) => cmd_workout(store, &ctx, &config, auto_complete, weight),
        Some(Commands::Stats) | None => cmd_stats(&store, &ctx),
    }
}

fn cmd_exercise(store: JsonStore, ctx: &UserContext, command: ExerciseCommand) -> Result<()> {
    let mut catalog = CatalogService::new(store);

    match command {
        ExerciseCommand::Add(form) => {
            let exercise = catalog.create(ctx, form.into())?;
            println!("✓ Added {} ({})", exercise.name, exercise.id);
        }
        ExerciseCommand::List { search, group, load } => {
            let filter = ExerciseFilter {
                search,
                muscle_group: group,
                load_type: load,
            };
            let exercises = catalog.list(ctx, &filter)?;
            if exercises.is_empty() {
                println!("No exercises found.");
            }
            for exercise in &exercises {
                display_exercise(exercise);
            }
        }
        ExerciseCommand::Edit { id, form } => {
            let exercise = catalog.update(ctx, id, form.into())?;
            println!("✓ Updated {} ({})", exercise.name, exercise.id);
        }
        ExerciseCommand::Delete { id } => {
            catalog.delete(ctx, id)?;
            println!("✓ Deleted {}", id);
        }
    }

    Ok(())
}

fn cmd_generate(
    mut store: JsonStore,
    ctx: &UserContext,
    config: &Config,
    groups: Vec<(MuscleGroup, Option<u32>)>,
    replace: Vec<usize>,
    start: bool,
    seed: Option<u64>,
) -> Result<()> {
    let catalog = store.list_exercises(&ctx.user_id)?;
    let available = counts_by_muscle_group(&catalog);

    let mut selection = Selection::with_default_count(config.generator.default_exercise_count);
    for (group, count) in groups {
        if !selection.add_available(group, &catalog) {
            eprintln!("No exercises for {} yet, skipping.", group);
            continue;
        }
        if let Some(count) = count {
            selection.set_count(group, count);
        }
    }

    tracing::debug!("Selection: {:?}", selection.entries());

    if selection.is_empty() {
        println!("Nothing to generate. Available groups:");
        for (group, count) in &available {
            println!("  {} ({} exercises)", group, count);
        }
        return Ok(());
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut workout = generate_workout(&catalog, selection.entries(), &mut rng);
    for position in replace {
        let replaced = position
            .checked_sub(1)
            .is_some_and(|index| replace_exercise(&mut workout, index, &catalog, &mut rng));
        if !replaced {
            eprintln!("No replacement available for exercise #{}", position);
        }
    }

    display_generated(&workout);

    if start {
        let saved = start_workout(&mut store, ctx, &workout)?;
        println!("\n✓ Workout started: {}", saved.name);
    }

    Ok(())
}

fn cmd_workout(
    mut store: JsonStore,
    ctx: &UserContext,
    config: &Config,
    auto_complete: bool,
    weight: Option<f64>,
) -> Result<()> {
    let mut view = SessionView::new(config.timer.rest_seconds, Box::new(TerminalNotifier))?;
    view.load(&store, ctx)?;

    let Some(session) = view.session_mut() else {
        println!("No active workout. Run `fitmaster generate --group <group> --start` first.");
        return Ok(());
    };

    if auto_complete {
        for exercise_index in 0..session.exercises().len() {
            let total_sets = session.exercises()[exercise_index].total_sets();
            for set_index in 0..total_sets {
                if let Some(weight) = weight {
                    session.update_set_weight(exercise_index, set_index, weight);
                }
                session.complete_set(exercise_index, set_index);
            }
            session.reset_timer();
        }
        println!("Progress: {:.0}%", session.progress());
        let finished = view.finish(&mut store, ctx)?;
        println!("✓ Workout finished: {}", finished.name);
        return Ok(());
    }

    run_interactive(&mut view, &mut store, ctx)
}

fn cmd_stats(store: &JsonStore, ctx: &UserContext) -> Result<()> {
    let stats = load_stats(store, ctx)?;
    println!("Exercises in catalog: {}", stats.total_exercises);
    println!("Workouts this week:   {}", stats.workouts_this_week);
    println!("Workouts in total:    {}", stats.total_workouts);
    Ok(())
}

fn run_interactive(view: &mut SessionView, store: &mut JsonStore, ctx: &UserContext) -> Result<()> {
    print_help();
    let stdin = io::stdin();

    loop {
        let Some(session) = view.session_mut() else {
            return Ok(());
        };
        display_session(session);
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            view.teardown();
            return Ok(());
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let current = session.current_index();
        let set_arg = |i: usize| {
            parts
                .get(i)
                .and_then(|s| s.parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
        };

        match parts.first().copied() {
            Some("c") => match set_arg(1) {
                Some(set) => session.complete_set(current, set),
                None => println!("usage: c <set>"),
            },
            Some("u") => match set_arg(1) {
                Some(set) => session.uncomplete_set(current, set),
                None => println!("usage: u <set>"),
            },
            Some("w") => match (set_arg(1), parts.get(2).and_then(|w| w.parse::<f64>().ok())) {
                (Some(set), Some(weight)) => session.update_set_weight(current, set, weight),
                _ => println!("usage: w <set> <kg>"),
            },
            Some("n") => {
                session.next_exercise();
            }
            Some("p") => {
                session.previous_exercise();
            }
            Some("j") => match set_arg(1) {
                Some(index) => session.jump_to(index),
                None => println!("usage: j <exercise>"),
            },
            Some("t") => match parts.get(1).and_then(|s| s.parse::<u32>().ok()) {
                Some(seconds) => {
                    if let Err(e) = session.set_rest_duration(seconds) {
                        println!("{}", e);
                    }
                }
                None => println!("usage: t <seconds>"),
            },
            Some("r") => rest(session)?,
            Some("f") => match view.finish(store, ctx) {
                Ok(workout) => {
                    println!("✓ Workout finished: {}", workout.name);
                    return Ok(());
                }
                Err(e) => println!("Could not save workout, try again: {}", e),
            },
            Some("q") => {
                view.teardown();
                println!("Session left open; run `fitmaster workout` to continue.");
                return Ok(());
            }
            _ => print_help(),
        }
    }
}

/// Count down the rest timer, starting it if it is idle
fn rest(session: &mut ActiveSession) -> Result<()> {
    match session.timer().state() {
        TimerState::Running => {}
        TimerState::Paused => session.resume_timer(),
        TimerState::Idle | TimerState::Finished => session.start_timer(),
    }

    let mut stdout = io::stdout();
    while session.timer().is_running() {
        write!(stdout, "\r  Rest: {}  ", format_time(session.timer().time_left()))?;
        stdout.flush()?;
        std::thread::sleep(Duration::from_secs(1));
        session.tick();
    }
    writeln!(stdout, "\r  Rest: {}  ", format_time(session.timer().time_left()))?;
    Ok(())
}

fn print_help() {
    println!("─────────────────────────────────────────");
    println!("  c <set>       complete a set");
    println!("  u <set>       undo a completed set");
    println!("  w <set> <kg>  record weight for a set");
    println!("  n / p         next / previous exercise");
    println!("  j <n>         jump to exercise n");
    println!("  r             rest (run the timer)");
    println!("  t <seconds>   rest duration (30, 45, 60, 90, 120, 180)");
    println!("  f             finish workout");
    println!("  q             leave without finishing");
}

fn display_exercise(exercise: &Exercise) {
    println!(
        "{}  {} [{} / {} / {}] {}x{}",
        exercise.id,
        exercise.name,
        exercise.muscle_group,
        exercise.exercise_type,
        exercise.load_type,
        exercise.sets,
        exercise.reps
    );
    if let Some(ref machine) = exercise.machine_name {
        println!(
            "    Machine: {} {}",
            machine,
            exercise.machine_settings.as_deref().unwrap_or("")
        );
    }
    if let Some(ref url) = exercise.video_url {
        println!("    ℹ Video: {}", url);
    }
}

fn display_generated(workout: &[GeneratedExercise]) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  GENERATED WORKOUT ({} exercises)", workout.len());
    println!("╰─────────────────────────────────────────╯");
    for (i, generated) in workout.iter().enumerate() {
        let exercise = &generated.exercise;
        println!(
            "  {}. {} [{} / {}] {}x{}{}",
            i + 1,
            exercise.name,
            exercise.muscle_group,
            exercise.exercise_type,
            exercise.sets,
            exercise.reps,
            if generated.is_replaced { " (replaced)" } else { "" }
        );
    }
}

fn display_session(session: &ActiveSession) {
    let Some(current) = session.current_exercise() else {
        println!("\nThis workout has no exercises left. Enter 'f' to finish.");
        return;
    };

    println!();
    println!(
        "{}  |  exercise {}/{}  |  {:.0}% done  |  rest {} ({:?})",
        session.workout().name,
        session.current_index() + 1,
        session.exercises().len(),
        session.progress(),
        format_time(session.timer().time_left()),
        session.timer().state()
    );
    display_active_exercise(current);
}

fn display_active_exercise(active: &ActiveWorkoutExercise) {
    println!(
        "  {} - {} sets x {} reps",
        active.exercise.name, active.entry.sets, active.entry.reps
    );
    if !active.exercise.technique.is_empty() {
        println!("  Technique: {}", active.exercise.technique);
    }
    for (i, set) in active.set_results.iter().enumerate() {
        let marker = if set.completed {
            "✓"
        } else if i == active.current_set {
            "→"
        } else {
            " "
        };
        println!("   {} set {}: {} kg", marker, i + 1, set.weight);
    }
}

/// Rings the terminal bell and prints the alert
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn request_permission(&mut self) -> bool {
        io::stdout().is_terminal()
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<()> {
        let mut stdout = io::stdout();
        writeln!(stdout, "\x07\n{} {}", title, body)?;
        stdout.flush()?;
        Ok(())
    }
}
