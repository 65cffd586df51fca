//! Main update function - handles state transitions (TEA pattern)

use callpane_core::prelude::*;
use callpane_core::{format_args, format_returns, IdlValue, InputKind, ServiceInterface};

use crate::console::ConsoleKind;
use crate::form::FormFocus;
use crate::hit_map::HitTarget;
use crate::invoker::CallResult;
use crate::message::{EditOp, Message};
use crate::result_view::{RenderedResult, ResultPane};
use crate::state::{AppPhase, AppState};

use super::{keys, scroll, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns an optional action for the event loop and an optional follow-up message
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match keys::handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Click { column, row } => handle_click(state, column, row),

        Message::Tick => UpdateResult::none(),

        Message::Quit | Message::RequestQuit => {
            state.request_quit();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Interface Enumeration
        // ─────────────────────────────────────────────────────────
        Message::InterfaceLoaded(interface) => {
            info!(
                "Interface loaded: {} ({} methods)",
                interface.name.as_deref().unwrap_or("<unnamed>"),
                interface.len()
            );
            state.load_interface(interface);
            UpdateResult::none()
        }

        Message::InterfaceFailed(reason) => {
            error!("Failed to load interface: {}", reason);
            state.load_error = Some(reason);
            state.phase = AppPhase::Failed;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::SelectNext => {
            state.select_next();
            UpdateResult::none()
        }

        Message::SelectPrevious => {
            state.select_previous();
            UpdateResult::none()
        }

        Message::SelectMethod(index) => {
            state.select(index);
            UpdateResult::none()
        }

        Message::FocusNext => {
            if let Some(entry) = state.selected_method_mut() {
                entry.form.focus_next();
            }
            UpdateResult::none()
        }

        Message::FocusPrevious => {
            if let Some(entry) = state.selected_method_mut() {
                entry.form.focus_previous();
            }
            UpdateResult::none()
        }

        Message::Focus { method, focus } => {
            set_focus(state, method, focus);
            UpdateResult::none()
        }

        Message::Edit(op) => {
            if let Some(entry) = state.selected_method_mut() {
                entry.form.edit(op);
            }
            UpdateResult::none()
        }

        Message::Activate => handle_activate(state),

        // ─────────────────────────────────────────────────────────
        // Calls
        // ─────────────────────────────────────────────────────────
        Message::Invoke { method, random } => handle_invoke(state, method, random),

        Message::CallFinished {
            method,
            args,
            outcome,
        } => handle_call_finished(state, method, &args, outcome),

        Message::CycleResultView { method } => {
            if let Some(entry) = state.methods.get_mut(method) {
                if entry.result.cycle() {
                    debug!(
                        "{}: showing {:?} view",
                        entry.signature.name,
                        entry.result.view()
                    );
                }
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Console Scrolling
        // ─────────────────────────────────────────────────────────
        Message::ScrollUp => scroll::handle_scroll_up(state),
        Message::ScrollDown => scroll::handle_scroll_down(state),
        Message::ScrollToTop => scroll::handle_scroll_to_top(state),
        Message::ScrollToBottom => scroll::handle_scroll_to_bottom(state),
        Message::PageUp => scroll::handle_page_up(state),
        Message::PageDown => scroll::handle_page_down(state),
    }
}

/// Select a method and focus one of its controls
fn set_focus(state: &mut AppState, method: usize, focus: FormFocus) {
    let Some(entry) = state.methods.get_mut(method) else {
        return;
    };
    if let FormFocus::Input(arg) = focus {
        if arg >= entry.form.inputs.len() {
            return;
        }
    }
    entry.form.focus = focus;
    state.selected = method;
}

/// Enter/Space on whatever the selected form has focused
fn handle_activate(state: &mut AppState) -> UpdateResult {
    let method = state.selected;
    let Some(entry) = state.selected_method_mut() else {
        return UpdateResult::none();
    };

    match entry.form.focus {
        FormFocus::Input(arg) => {
            let is_toggle = entry
                .form
                .inputs
                .get(arg)
                .is_some_and(|input| input.kind == InputKind::Toggle);
            if is_toggle {
                entry.form.edit(EditOp::Toggle);
                UpdateResult::none()
            } else {
                UpdateResult::message(Message::Invoke {
                    method,
                    random: false,
                })
            }
        }
        FormFocus::Invoke => UpdateResult::message(Message::Invoke {
            method,
            random: false,
        }),
        FormFocus::Lucky => UpdateResult::message(Message::Invoke {
            method,
            random: true,
        }),
        FormFocus::Result => UpdateResult::message(Message::CycleResultView { method }),
    }
}

/// Resolve a click against the regions of the last frame
fn handle_click(state: &mut AppState, column: u16, row: u16) -> UpdateResult {
    if state.phase != AppPhase::Ready {
        return UpdateResult::none();
    }
    let Some(target) = state.hit_map.target_at(column, row) else {
        return UpdateResult::none();
    };
    let method = target.method();
    state.select(method);

    match target {
        HitTarget::Method(_) => UpdateResult::none(),
        HitTarget::Input { arg, .. } => {
            set_focus(state, method, FormFocus::Input(arg));
            if let Some(entry) = state.methods.get_mut(method) {
                let is_toggle = entry
                    .form
                    .inputs
                    .get(arg)
                    .is_some_and(|input| input.kind == InputKind::Toggle);
                if is_toggle {
                    entry.form.edit(EditOp::Toggle);
                }
            }
            UpdateResult::none()
        }
        HitTarget::Invoke(_) => {
            set_focus(state, method, FormFocus::Invoke);
            UpdateResult::message(Message::Invoke {
                method,
                random: false,
            })
        }
        HitTarget::Lucky(_) => {
            set_focus(state, method, FormFocus::Lucky);
            UpdateResult::message(Message::Invoke {
                method,
                random: true,
            })
        }
        HitTarget::Result(_) => {
            set_focus(state, method, FormFocus::Result);
            UpdateResult::message(Message::CycleResultView { method })
        }
    }
}

/// Collect the form and, when every input is valid, issue the call
fn handle_invoke(state: &mut AppState, method: usize, random: bool) -> UpdateResult {
    if state.phase != AppPhase::Ready {
        return UpdateResult::none();
    }
    let cfg = state.settings.random.to_config();
    let Some(entry) = state.methods.get_mut(method) else {
        return UpdateResult::none();
    };

    let args = if random {
        entry.form.collect_random(&mut state.rng, &cfg)
    } else {
        entry.form.collect()
    };

    let Some(args) = args else {
        debug!("{}: input rejected, not calling", entry.signature.name);
        return UpdateResult::none();
    };

    entry.result = ResultPane::Waiting;
    state.in_flight += 1;

    UpdateResult::action(UpdateAction::Invoke {
        method,
        signature: entry.signature.clone(),
        args,
    })
}

/// A call came back: rebuild the pane and append to the console
fn handle_call_finished(
    state: &mut AppState,
    method: usize,
    args: &[IdlValue],
    outcome: std::result::Result<CallResult, String>,
) -> UpdateResult {
    state.in_flight = state.in_flight.saturating_sub(1);
    let width = state.settings.ui.text_width;
    let Some(entry) = state.methods.get_mut(method) else {
        warn!("Call finished for unknown method #{}", method);
        return UpdateResult::none();
    };

    match outcome {
        Ok(result) => {
            info!(
                "{} completed in {:.3}s",
                entry.signature.name,
                result.elapsed_secs()
            );
            let name = ServiceInterface::display_name(&entry.signature);
            state.console.append(
                ConsoleKind::Call,
                format!("› {}{}", name, format_args(args, width)),
            );
            state
                .console
                .append(ConsoleKind::Result, format_returns(&result.values, width));

            entry.result =
                ResultPane::Ready(RenderedResult::new(&result, &entry.signature.rets, width));
        }
        Err(message) => {
            error!("{} failed: {}", entry.signature.name, message);
            entry.result = ResultPane::Failed(message);
        }
    }

    UpdateResult::none()
}
