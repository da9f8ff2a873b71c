use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    config,
    core::{Engine, EngineState},
    render::FrameBuffer,
    types::EngineOptions,
};

pub fn run() -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut engine = Engine::new(EngineOptions::default());
    // Inner area of the viewport block from the last draw; mouse coordinates
    // are translated relative to it.
    let mut viewport = Rect::default();

    let mut accumulator = 0.0_f32;
    let mut last_tick = std::time::Instant::now();
    let mut last_render = std::time::Instant::now();
    let render_interval = Duration::from_secs_f32(1.0 / config::RENDER_HZ);
    let mut sim_counter = 0_u32;
    let mut render_counter = 0_u32;
    let mut last_fps_sample = std::time::Instant::now();
    let mut sim_fps = 0.0_f32;
    let mut render_fps = 0.0_f32;

    loop {
        let now = std::time::Instant::now();
        let dt = (now - last_tick).as_secs_f32();
        last_tick = now;
        accumulator += dt;

        while accumulator >= config::DT {
            engine.tick();
            accumulator -= config::DT;
            sim_counter += 1;
        }

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                CrosstermEvent::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        engine.unmount();
                        shutdown_terminal(&mut terminal)?;
                        return Ok(());
                    }
                    KeyCode::Char('r') => {
                        engine.request_refresh();
                    }
                    KeyCode::Up => {
                        let quantity = (engine.options().quantity + config::QUANTITY_STEP)
                            .min(config::QUANTITY_MAX);
                        engine.set_quantity(quantity);
                    }
                    KeyCode::Down => {
                        let quantity = engine
                            .options()
                            .quantity
                            .saturating_sub(config::QUANTITY_STEP)
                            .max(config::QUANTITY_MIN);
                        engine.set_quantity(quantity);
                    }
                    _ => {}
                },
                CrosstermEvent::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Moved {
                        // Surface-local coordinates; may be negative outside
                        // the viewport, which the physics tolerates
                        engine.pointer_moved(
                            mouse.column as f32 - viewport.x as f32,
                            mouse.row as f32 - viewport.y as f32,
                        );
                    }
                }
                _ => {}
            }
        }

        if last_render.elapsed() >= render_interval {
            if last_fps_sample.elapsed() >= Duration::from_secs(1) {
                let secs = last_fps_sample.elapsed().as_secs_f32();
                sim_fps = sim_counter as f32 / secs;
                render_fps = render_counter as f32 / secs;
                sim_counter = 0;
                render_counter = 0;
                last_fps_sample = std::time::Instant::now();
            }
            terminal.draw(|frame| {
                let size = frame.size();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(3),
                        Constraint::Length(3),
                    ])
                    .split(size);

                let header = Paragraph::new(format!(
                    "particles: {} | quantity: {} | color: {} | ease: {:.0} | staticity: {:.0} | sim fps: {:.1} | render fps: {:.1}",
                    engine.particles().len(),
                    engine.options().quantity,
                    engine.options().color,
                    engine.options().ease,
                    engine.options().staticity,
                    sim_fps,
                    render_fps
                ))
                .block(Block::default().borders(Borders::ALL).title("dustfield"));
                frame.render_widget(header, chunks[0]);

                let block = Block::default().borders(Borders::ALL).title("Field");
                let inner = block.inner(chunks[1]);
                match engine.state() {
                    EngineState::Uninitialized => {
                        engine.mount(inner.width, inner.height);
                        viewport = inner;
                    }
                    EngineState::Mounted if inner != viewport => {
                        engine.resize(inner.width, inner.height);
                        viewport = inner;
                    }
                    _ => {}
                }

                let lines = field_lines(engine.surface().frame());
                frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);

                let footer = Paragraph::new(
                    "move mouse: attract | ↑↓: quantity | r: refresh | q: quit",
                )
                .block(Block::default().borders(Borders::ALL).title("Controls"));
                frame.render_widget(footer, chunks[2]);
            })?;

            last_render = std::time::Instant::now();
            render_counter += 1;
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn shutdown_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn field_lines(frame: &FrameBuffer) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(frame.height() as usize);
    for y in 0..frame.height() {
        let mut spans: Vec<Span> = Vec::with_capacity(frame.width() as usize);
        for x in 0..frame.width() {
            let cell = frame.get(x, y);
            if cell.alpha <= 0.0 {
                spans.push(Span::raw(" "));
                continue;
            }
            let glyph = if cell.alpha >= 0.45 {
                "●"
            } else if cell.alpha >= 0.2 {
                "•"
            } else {
                "·"
            };
            let color = Color::Rgb(
                (cell.color.r as f32 * cell.alpha) as u8,
                (cell.color.g as f32 * cell.alpha) as u8,
                (cell.color.b as f32 * cell.alpha) as u8,
            );
            spans.push(Span::styled(glyph, Style::default().fg(color)));
        }
        lines.push(Line::from(spans));
    }
    lines
}
