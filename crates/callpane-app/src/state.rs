//! Application state (Model in TEA pattern)

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use callpane_core::{MethodSignature, ServiceInterface};

use crate::config::Settings;
use crate::console::{Console, ConsoleViewState};
use crate::form::MethodForm;
use crate::hit_map::HitMap;
use crate::result_view::ResultPane;

/// Lifecycle of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    /// Waiting for the method list
    #[default]
    Loading,
    /// Forms are shown
    Ready,
    /// The method list could not be obtained
    Failed,
    /// Shutting down
    Quitting,
}

/// One method with its form and result area
#[derive(Debug, Clone)]
pub struct MethodEntry {
    pub signature: Arc<MethodSignature>,
    pub form: MethodForm,
    pub result: ResultPane,
}

impl MethodEntry {
    pub fn new(signature: Arc<MethodSignature>) -> Self {
        let form = MethodForm::new(&signature);
        Self {
            signature,
            form,
            result: ResultPane::Hidden,
        }
    }

    /// Label of the invoke button
    pub fn invoke_label(&self) -> &'static str {
        if self.signature.is_query() {
            "Query"
        } else {
            "Call"
        }
    }
}

/// Complete application state (the Model in TEA)
pub struct AppState {
    pub phase: AppPhase,

    /// Short description of the service (command line or "demo")
    pub service_label: String,

    /// Name from the interface description, if it has one
    pub interface_name: Option<String>,

    /// Why loading the method list failed
    pub load_error: Option<String>,

    /// Methods in declaration order
    pub methods: Vec<MethodEntry>,

    /// Index of the selected method
    pub selected: usize,

    /// Calls issued and not yet finished
    pub in_flight: usize,

    pub console: Console,
    pub console_view: ConsoleViewState,

    /// Clickable regions of the last frame
    pub hit_map: HitMap,

    /// First method card drawn (set during render)
    pub methods_scroll: usize,

    pub settings: Settings,

    /// Source of "Lucky" values
    pub rng: StdRng,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let rng = match settings.random.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            phase: AppPhase::Loading,
            service_label: String::new(),
            interface_name: None,
            load_error: None,
            methods: Vec::new(),
            selected: 0,
            in_flight: 0,
            console: Console::new(settings.ui.console_capacity),
            console_view: ConsoleViewState::new(),
            hit_map: HitMap::new(),
            methods_scroll: 0,
            settings,
            rng,
        }
    }

    /// Replace the method list with a freshly loaded interface
    pub fn load_interface(&mut self, interface: ServiceInterface) {
        self.interface_name = interface.name.clone();
        self.methods = interface
            .methods
            .into_iter()
            .map(MethodEntry::new)
            .collect();
        self.selected = 0;
        self.methods_scroll = 0;
        self.load_error = None;
        self.phase = AppPhase::Ready;
    }

    pub fn selected_method(&self) -> Option<&MethodEntry> {
        self.methods.get(self.selected)
    }

    pub fn selected_method_mut(&mut self) -> Option<&mut MethodEntry> {
        self.methods.get_mut(self.selected)
    }

    pub fn select(&mut self, index: usize) {
        if index < self.methods.len() {
            self.selected = index;
        }
    }

    pub fn select_next(&mut self) {
        if !self.methods.is_empty() {
            self.selected = (self.selected + 1) % self.methods.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.methods.is_empty() {
            self.selected = (self.selected + self.methods.len() - 1) % self.methods.len();
        }
    }

    /// Whether typed characters go into an input of the selected form
    pub fn is_editing(&self) -> bool {
        self.phase == AppPhase::Ready
            && self
                .selected_method()
                .is_some_and(|entry| entry.form.is_editing())
    }

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Header title: interface name, falling back to the service label
    pub fn title(&self) -> &str {
        self.interface_name
            .as_deref()
            .unwrap_or(self.service_label.as_str())
    }
}
