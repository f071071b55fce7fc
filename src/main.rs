use campaign_planner::PlannerSession;
use campaign_planner::config::PlannerConfig;
use std::env;
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Create output directory
    const TMP_DIR: &str = "tmp";
    if let Err(e) = fs::create_dir_all(TMP_DIR) {
        eprintln!("Failed to create tmp directory: {}", e);
        std::process::exit(1);
    }
    println!("Created output directory at '{}'", TMP_DIR);

    // Optional config file
    let config = match env::args().nth(1) {
        Some(path) => {
            println!("Loading config from: {}", path);
            match PlannerConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("No config file provided. Using defaults.");
            PlannerConfig::default()
        }
    };

    let mut session = match PlannerSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to start session: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n{}", session.context_summary());
    println!("\n{}", session.data_summary());

    // Refinement
    let command = "rename the task 'task_app' to 'Send App Push (Cluster 1)'";
    println!("\nApplying command: {}", command);
    println!("  -> {}", session.apply_command(command));

    // Audience
    let filter = match session.default_filter() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Failed to build default filter: {}", e);
            std::process::exit(1);
        }
    };
    match session.save_audience(&filter) {
        Ok(count) => println!("\nAudience saved: {} agents", count),
        Err(e) => {
            eprintln!("Failed to save audience: {}", e);
            std::process::exit(1);
        }
    }

    // Graph
    match session.render_graph() {
        Ok(graph) => {
            let dot_path = format!("{}/campaign_process.dot", TMP_DIR);
            if let Err(e) = fs::write(&dot_path, graph.to_dot()) {
                eprintln!("Failed to write graph: {}", e);
                std::process::exit(1);
            }
            println!("  -> Wrote process graph to '{}'", dot_path);
        }
        Err(e) => eprintln!("Render failed: {}", e),
    }

    // Artifacts
    for artifact in [session.export_bpmn(), session.export_audience()] {
        let written = artifact.map_err(|e| e.to_string()).and_then(|artifact| {
            artifact
                .write_to(TMP_DIR)
                .map(|path| (path, artifact.mime))
                .map_err(|e| e.to_string())
        });
        match written {
            Ok((path, mime)) => println!("  -> Wrote {} to '{}'", mime, path.display()),
            Err(e) => {
                eprintln!("Export failed: {}", e);
                std::process::exit(1);
            }
        }
    }
    println!();
}
