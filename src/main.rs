use pokemon_arena::{
    BattleUpdate, MemorySink, Simulation, SimulationConfig, StaticCatalog,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let catalog = Arc::new(StaticCatalog::new());
    let sink = Arc::new(MemorySink::new());

    // Fast ticks for the demo; real deployments use the default 3s cadence.
    let config = SimulationConfig {
        tick_interval: Duration::from_millis(150),
    };
    let simulation = Simulation::new(catalog, sink.clone(), config);

    println!("=== Pokemon Arena Demo: Pikachu vs Charizard ===");
    let mut handle = match simulation.start_battle(25, 6).await {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("Failed to start battle: {}", err);
            return;
        }
    };

    let mut printed = 0;
    while let Some(update) = handle.recv().await {
        match update {
            BattleUpdate::Tick(tick) => {
                // The snapshot log carries everything formatted so far; print
                // only the new lines.
                for line in &tick.snapshot.event_log[printed..] {
                    println!("{}", line);
                }
                printed = tick.snapshot.event_log.len();
            }
            BattleUpdate::Concluded(summary) => {
                println!();
                println!(
                    "Winner: {} after {} turns ({} total damage dealt)",
                    match summary.winner {
                        pokemon_arena::Side::A => &summary.combatant_a.name,
                        pokemon_arena::Side::B => &summary.combatant_b.name,
                    },
                    summary.turns,
                    summary.total_damage
                );
                break;
            }
        }
    }

    // Reporting runs on a detached task; give it a moment to land.
    tokio::time::sleep(Duration::from_millis(50)).await;
    println!();
    println!("Recent results:");
    for record in sink.recent(5).await {
        println!(
            "  {} | winner: {:?} | turns: {} | weather: {}",
            record.battle_id, record.winner, record.turns, record.weather
        );
    }
}
