mod display;

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use level_meter_core::MeterSession;
use level_meter_cpal::{list_input_devices, CpalInputCapture};

use crate::display::MeterView;

type Session = MeterSession<CpalInputCapture>;

fn main() {
    env_logger::init();

    let session: Arc<Mutex<Session>> = Arc::new(Mutex::new(MeterSession::new(
        CpalInputCapture::default_device(),
    )));

    let render_running = Arc::new(AtomicBool::new(true));
    let render_handle = spawn_render_loop(Arc::clone(&session), Arc::clone(&render_running));

    println!("level-meter — commands: start, stop, devices, status, quit");
    prompt();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match line.trim() {
            "start" => {
                let mut session = session.lock();
                if session.state().is_listening() {
                    println!("already listening");
                } else {
                    match session.start() {
                        Ok(()) => println!("listening ('stop' to end)"),
                        Err(err) => println!("error: {}", err.user_message()),
                    }
                }
            }
            "stop" => {
                let mut session = session.lock();
                if session.state().is_listening() {
                    session.stop();
                    println!("stopped");
                } else {
                    println!("not listening");
                }
            }
            "devices" => match list_input_devices() {
                Ok(devices) if devices.is_empty() => println!("no input devices found"),
                Ok(devices) => {
                    for device in devices {
                        let marker = if device.is_default { " (default)" } else { "" };
                        println!("  {}{}", device.name, marker);
                    }
                }
                Err(err) => println!("error: {}", err.user_message()),
            },
            "status" => {
                let session = session.lock();
                let view = MeterView::new();
                println!("{}", view.render(&session.state(), &session.reading()));
            }
            "quit" | "exit" | "q" => break,
            "" => {}
            other => println!("unknown command: {other}"),
        }
        prompt();
    }

    render_running.store(false, Ordering::SeqCst);
    let _ = render_handle.join();
    session.lock().stop();
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

/// Redraw the meter line ~20 times a second while a session is listening.
fn spawn_render_loop(
    session: Arc<Mutex<Session>>,
    running: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("meter-render".into())
        .spawn(move || {
            let view = MeterView::new();
            let mut was_listening = false;

            while running.load(Ordering::SeqCst) {
                thread::sleep(Duration::from_millis(50));

                let (state, reading) = {
                    let session = session.lock();
                    (session.state(), session.reading())
                };

                if state.is_listening() {
                    print!("\x1b[2K\r{}", view.render(&state, &reading));
                    let _ = io::stdout().flush();
                    was_listening = true;
                } else if was_listening {
                    // Leave the last frame and give the prompt its line back.
                    println!();
                    prompt();
                    was_listening = false;
                }
            }
        })
        .expect("failed to spawn render thread")
}
