//! Scripted pricing carousel rendered to the terminal.
//!
//! Set `SLIDEKIT_ANIMATION`, `SLIDEKIT_DRAG` or `SLIDEKIT_AUTOPLAY_MS` to
//! change how the carousel behaves, and `RUST_LOG=debug` to watch it think.

mod render;

use anyhow::Context;
use slidekit::prelude::*;
use slidekit::{PointerId, RecordingHost, ShellClock};

const PLANS: [&str; 4] = ["Starter", "Pro", "Team", "Enterprise"];
const FRAME_MS: u64 = 16;
const NARROW: f32 = 320.0;
const WIDE: f32 = 1024.0;

#[derive(Clone, Copy, Debug)]
enum Step {
    Swipe { from_x: f32, to_x: f32, duration_ms: u64 },
    Next,
    Previous,
    GoTo(isize),
    Resize(f32),
    Wait(u64),
}

const SCRIPT: &[Step] = &[
    Step::Swipe {
        from_x: 260.0,
        to_x: 200.0,
        duration_ms: 60,
    },
    Step::Next,
    Step::Swipe {
        from_x: 200.0,
        to_x: 170.0,
        duration_ms: 600,
    },
    Step::GoTo(3),
    Step::Next,
    Step::Previous,
    Step::Resize(WIDE),
    Step::GoTo(0),
    Step::Resize(NARROW),
    Step::Wait(1500),
];

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    let _ = env_logger::try_init();

    let config = CarouselConfig::default().apply_env_overrides();
    let host = RecordingHost::new();
    let mut shell = CarouselShell::with_clock(host.clone(), PLANS.len(), config, ShellClock::Manual(0))
        .context("failed to mount the pricing carousel")?;
    shell.handle(HostEvent::Resize {
        width: NARROW,
        height: 200.0,
    });

    let _announcer = shell.carousel().subscribe(|change: &IndexChange| {
        log::info!(
            "plan {} -> {}",
            PLANS[change.previous_index],
            PLANS[change.new_index]
        );
    });

    print_frame(&shell, "mounted");
    for step in SCRIPT {
        run_step(&mut shell, *step);
        settle(&mut shell);
        print_frame(&shell, &format!("{step:?}"));
    }

    drop(shell);
    log::info!("host listeners left after unmount: {}", host.active_count());
    Ok(())
}

fn run_step(shell: &mut CarouselShell<RecordingHost>, step: Step) {
    match step {
        Step::Swipe {
            from_x,
            to_x,
            duration_ms,
        } => swipe(shell, from_x, to_x, duration_ms),
        Step::Next => {
            shell.carousel_mut().next();
        }
        Step::Previous => {
            shell.carousel_mut().previous();
        }
        Step::GoTo(index) => {
            shell.carousel_mut().go_to(index);
        }
        Step::Resize(width) => {
            shell.handle(HostEvent::Resize {
                width,
                height: 200.0,
            });
        }
        Step::Wait(ms) => {
            for _ in 0..ms / FRAME_MS {
                tick(shell);
            }
        }
    }
}

fn swipe(shell: &mut CarouselShell<RecordingHost>, from_x: f32, to_x: f32, duration_ms: u64) {
    const STEPS: u64 = 6;
    shell.handle(HostEvent::PointerDown {
        pointer: PointerId::PRIMARY,
        x: from_x,
        y: 100.0,
    });
    for step in 1..=STEPS {
        shell.advance_clock_ms(duration_ms / STEPS);
        let x = from_x + (to_x - from_x) * step as f32 / STEPS as f32;
        shell.handle(HostEvent::PointerMove {
            pointer: PointerId::PRIMARY,
            x,
            y: 100.0,
        });
        shell.handle(HostEvent::Frame);
    }
    shell.handle(HostEvent::PointerUp {
        pointer: PointerId::PRIMARY,
    });
}

fn tick(shell: &mut CarouselShell<RecordingHost>) {
    shell.advance_clock_ms(FRAME_MS);
    shell.handle(HostEvent::Frame);
}

/// Runs frames until the carousel rests, or two seconds pass.
fn settle(shell: &mut CarouselShell<RecordingHost>) {
    for _ in 0..(2000 / FRAME_MS) {
        tick(shell);
        if shell.carousel().is_settled() && !shell.carousel().is_auto_playing() {
            break;
        }
    }
    shell.log_debug_info();
}

fn print_frame(shell: &CarouselShell<RecordingHost>, title: &str) {
    let snapshot = shell.snapshot();
    println!("── {title}");
    println!("{}", render::render_frame(&snapshot, &PLANS));
    println!(
        "   page {} of {}, offset {:.0}px",
        snapshot.current_index + 1,
        snapshot.item_count,
        snapshot.offset
    );
}
