//! Windowed front end (eframe + egui, OpenGL through glow)
//!
//! eframe owns the OS event loop, so the frame loop is driven from
//! `eframe::App::update`: every call runs exactly one `step`. Window and GL
//! context lifetimes are scoped by `eframe::run_native`.

use super::{step, BackendGuard, DisplayBackend};
use crate::app::App;
use crate::error::FrameError;
use crate::session::{Credential, FONT_SCALE_MAX, FONT_SCALE_MIN};
use crate::types::{
    MenuItem, Panel, RunState, StopReason, LOGIN_PROMPT, MENU_TITLE, NAV_BUTTONS, TIMELINE_POSTS,
};
use crate::ui::layout::{FramePlan, LayoutProfile, PanelRect, Size};
use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{info, warn};

/// Body font size used until the first frame reports the real one
const DEFAULT_FONT_SIZE: f32 = 13.0;

pub struct GraphicsBackend {
    ctx: egui::Context,
    profile: LayoutProfile,
}

impl DisplayBackend for GraphicsBackend {
    type Options = egui::Context;

    fn startup(ctx: egui::Context) -> Result<Self> {
        ctx.set_visuals(egui::Visuals::dark());
        Ok(Self {
            ctx,
            profile: LayoutProfile::graphics(DEFAULT_FONT_SIZE),
        })
    }

    fn name(&self) -> &'static str {
        "graphics"
    }

    fn poll_events(&mut self, _app: &mut App) -> Result<bool, FrameError> {
        // eframe already fed this frame's input to egui
        Ok(self.ctx.input(|i| i.viewport().close_requested()))
    }

    fn new_frame(&mut self, app: &mut App) -> Result<(), FrameError> {
        let scale = app.display.font_scale();
        if self.ctx.zoom_factor() != scale {
            self.ctx.set_zoom_factor(scale);
        }

        let font_size = self
            .ctx
            .style()
            .text_styles
            .get(&egui::TextStyle::Body)
            .map(|font| font.size)
            .unwrap_or(DEFAULT_FONT_SIZE);
        self.profile = LayoutProfile::graphics(font_size);
        Ok(())
    }

    fn render(&mut self, app: &mut App) -> Result<(), FrameError> {
        let screen = self.ctx.screen_rect();
        let display = Size::new(screen.width(), screen.height());
        let plan = FramePlan::begin(&self.profile, display, app.login_visible());

        compose_navigation(&self.ctx, app, &self.profile, plan.navigation)?;
        compose_timeline(&self.ctx, plan.timeline)?;
        if let Some(login) = plan.login {
            compose_login(&self.ctx, app, login)?;
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        Ok(())
    }
}

fn pos(rect: PanelRect) -> egui::Pos2 {
    egui::pos2(rect.x, rect.y)
}

fn size(rect: PanelRect) -> egui::Vec2 {
    egui::vec2(rect.width, rect.height)
}

/// Full-window panel with the Actions menu, button column and font slider
fn compose_navigation(
    ctx: &egui::Context,
    app: &mut App,
    profile: &LayoutProfile,
    rect: PanelRect,
) -> Result<(), FrameError> {
    let mut open = true;
    let logged_in = app.session.is_logged_in();
    let row_gap = profile.cell_height;

    let shown = egui::Window::new(Panel::Navigation.title())
        .id(egui::Id::new("navigation"))
        .open(&mut open)
        .fixed_pos(pos(rect))
        .fixed_size(size(rect))
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Background)
        .show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button(MENU_TITLE, |ui| {
                    for item in MenuItem::all() {
                        if *item == MenuItem::Quit {
                            ui.separator();
                        }
                        let button = egui::Button::new(item.label()).shortcut_text(item.hint());
                        if ui.add_enabled(item.is_enabled(logged_in), button).clicked() {
                            app.activate_menu(*item);
                            ui.close_menu();
                        }
                    }
                });
            });

            let column = egui::vec2(profile.nav_column_width(), ui.available_height());
            ui.allocate_ui(column, |ui| {
                ui.vertical(|ui| {
                    for (i, label) in NAV_BUTTONS.iter().enumerate() {
                        ui.add_space(row_gap);
                        if ui.button(*label).clicked() {
                            app.press_nav_button(i);
                        }
                    }

                    ui.add_space(row_gap);
                    ui.label("Font Scale:");
                    let mut scale = app.display.font_scale();
                    let slider = egui::Slider::new(&mut scale, FONT_SCALE_MIN..=FONT_SCALE_MAX);
                    if ui.add(slider).changed() {
                        app.set_font_scale(scale);
                    }
                });
            });
        });

    if shown.is_none() {
        return Err(FrameError::PanelBegin(Panel::Navigation));
    }
    if !open {
        app.stop(StopReason::CloseRequested);
    }
    Ok(())
}

/// Scrollable wrapped placeholder posts
fn compose_timeline(ctx: &egui::Context, rect: PanelRect) -> Result<(), FrameError> {
    let shown = egui::Window::new(Panel::Timeline.title())
        .id(egui::Id::new("timeline"))
        .fixed_pos(pos(rect))
        .fixed_size(size(rect))
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let gap = ui.text_style_height(&egui::TextStyle::Body);
                    for post in TIMELINE_POSTS {
                        ui.add_space(gap);
                        ui.label(post);
                    }
                });
        });

    shown
        .map(|_| ())
        .ok_or(FrameError::PanelBegin(Panel::Timeline))
}

/// Login form. Position and size are only initial; the user may move it.
fn compose_login(ctx: &egui::Context, app: &mut App, rect: PanelRect) -> Result<(), FrameError> {
    let shown = egui::Window::new(Panel::Login.title())
        .id(egui::Id::new("login"))
        .default_pos(pos(rect))
        .default_size(size(rect))
        .collapsible(false)
        .show(ctx, |ui| {
            let gap = ui.text_style_height(&egui::TextStyle::Body);
            let session = &mut app.session;

            ui.add_space(gap);
            ui.label(LOGIN_PROMPT);
            ui.add_space(gap);
            ui.horizontal(|ui| {
                let mut email = session.email.as_str().to_owned();
                let edit = egui::TextEdit::singleline(&mut email).char_limit(Credential::max_len());
                if ui.add(edit).changed() {
                    session.email.set(&email);
                }
                ui.label("Email");
            });
            ui.add_space(gap);
            ui.horizontal(|ui| {
                let mut password = session.password.as_str().to_owned();
                let edit = egui::TextEdit::singleline(&mut password)
                    .password(true)
                    .char_limit(Credential::max_len());
                if ui.add(edit).changed() {
                    session.password.set(&password);
                }
                ui.label("Password");
            });
            ui.add_space(gap);

            ui.button(" Login ").clicked()
        });

    match shown {
        Some(response) => {
            if response.inner == Some(true) {
                app.submit_login();
            }
            Ok(())
        }
        None => Err(FrameError::PanelBegin(Panel::Login)),
    }
}

/// eframe adapter: one frame-loop step per `update`
struct GraphicsApp {
    backend: Option<BackendGuard<GraphicsBackend>>,
    app: App,
    clear_color: [f32; 4],
    failure: Rc<RefCell<Option<anyhow::Error>>>,
}

impl GraphicsApp {
    fn finish(&mut self, failure: Option<anyhow::Error>) {
        if let Some(guard) = self.backend.take() {
            if let Err(e) = guard.shutdown() {
                warn!("display shutdown failed: {:#}", e);
            }
        }
        if let Some(err) = failure {
            *self.failure.borrow_mut() = Some(err);
        }
    }
}

impl eframe::App for GraphicsApp {
    fn update(&mut self, _ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        match step(&mut **backend, &mut self.app) {
            Ok(RunState::Running) => {}
            Ok(RunState::Stopped(_)) => self.finish(None),
            Err(err) => self.finish(Some(err)),
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        self.clear_color
    }
}

/// Open the window and run until the app stops
pub fn run(app: App) -> Result<()> {
    let options = app.config.graphics.clone();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(options.title.clone())
            .with_inner_size([options.width, options.height])
            .with_resizable(true),
        vsync: options.vsync,
        centered: true,
        ..Default::default()
    };

    let failure = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&failure);
    let clear_color = options.clear_color;

    let app_creator = move |cc: &eframe::CreationContext<'_>| -> Result<
        Box<dyn eframe::App>,
        Box<dyn std::error::Error + Send + Sync>,
    > {
        let backend = GraphicsBackend::startup(cc.egui_ctx.clone())?;
        Ok(Box::new(GraphicsApp {
            backend: Some(BackendGuard::new(backend)),
            app,
            clear_color,
            failure: slot,
        }))
    };

    info!(width = options.width, height = options.height, "opening window");

    eframe::run_native(&options.title, native_options, Box::new(app_creator))
        .map_err(|e| anyhow!("Graphics backend failed: {e}"))?;

    let failure = failure.borrow_mut().take();
    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
