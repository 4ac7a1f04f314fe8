//! Desktop simulator for the dial watch.
//!
//! Runs the same [`App`] loop as the firmware against an SDL2 window via
//! `embedded-graphics-simulator`. The left mouse button is the touch panel;
//! holding it down is a held contact. The panel is masked to a circle and
//! dimmed by the backlight level the app requests.
//!
//! The settings record is written to `settings.bin` in the working
//! directory. Set `RUST_LOG=debug` to see dispatch traces.
//!
//! | Key      | Action |
//! |----------|--------|
//! | Q / Esc  | Quit   |

mod board;

use std::time::Duration as StdDuration;

use embassy_futures::block_on;
use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
    sdl2::MouseButton,
};
use log::{error, info};

use dial_core::app::App;
use dial_core::config::SETTINGS_RECORD_NAME;
use dial_core::ui::{DISPLAY_CENTER_PX, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, TouchPoint};

use board::SimBoard;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Shortest host frame, so 1 ms interactive frames don't spin the CPU.
const MIN_FRAME: StdDuration = StdDuration::from_millis(16);

fn to_touch(point: Point) -> TouchPoint {
    TouchPoint::new(
        point.x.clamp(0, DISPLAY_WIDTH_PX as i32 - 1) as u16,
        point.y.clamp(0, DISPLAY_HEIGHT_PX as i32 - 1) as u16,
    )
}

/// Copy the canvas onto the window panel, applying the round mask and the
/// backlight level.
fn present(canvas: &SimulatorDisplay<Rgb565>, panel: &mut SimulatorDisplay<Rgb565>, level: f32) {
    let (cx, cy) = DISPLAY_CENTER_PX;
    let radius_sq = cx * cx;
    let scale = |channel: u8| (channel as f32 * level) as u8;

    let pixels = (0..DISPLAY_HEIGHT_PX as i32).flat_map(|y| {
        (0..DISPLAY_WIDTH_PX as i32).map(move |x| {
            let point = Point::new(x, y);
            let (dx, dy) = (x - cx, y - cy);
            let color = if dx * dx + dy * dy > radius_sq {
                Rgb565::BLACK
            } else {
                let c = canvas.get_pixel(point);
                Rgb565::new(scale(c.r()), scale(c.g()), scale(c.b()))
            };
            Pixel(point, color)
        })
    });
    // SimulatorDisplay drawing is infallible
    let _ = panel.draw_iter(pixels);
}

fn main() {
    env_logger::init();
    info!("Starting dial simulator");
    info!(
        "Display: {}×{} (scale {}×), settings in {}",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE, SETTINGS_RECORD_NAME
    );

    let size = Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX);
    let mut canvas = SimulatorDisplay::<Rgb565>::new(size);
    let mut panel = SimulatorDisplay::<Rgb565>::new(size);

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Dial Simulator", &output_settings);

    let mut board = SimBoard::new(SETTINGS_RECORD_NAME);
    let mut app = App::new(Instant::now());
    block_on(app.boot(&mut board, Instant::now()));

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    if let Err(e) = app.draw(&mut canvas) {
        error!("Draw error: {:?}", e);
    }
    present(&canvas, &mut panel, board.backlight.level);
    window.update(&panel);

    'running: loop {
        let frame_start = std::time::Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                }
                SimulatorEvent::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    point,
                } => board.touch.press(to_touch(point)),
                SimulatorEvent::MouseMove { point } => board.touch.drag(to_touch(point)),
                SimulatorEvent::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    ..
                } => board.touch.release(),
                _ => {}
            }
        }

        let delay = block_on(app.step(&mut board, Instant::now()));

        if let Err(e) = app.draw(&mut canvas) {
            error!("Draw error: {:?}", e);
        }
        present(&canvas, &mut panel, board.backlight.level);
        window.update(&panel);

        let wanted = StdDuration::from_micros(delay.as_micros()).max(MIN_FRAME);
        let elapsed = frame_start.elapsed();
        if elapsed < wanted {
            std::thread::sleep(wanted - elapsed);
        }
    }

    info!("Simulator exiting");
}
