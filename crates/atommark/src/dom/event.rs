/// Activation event delivered to an injected control. The handler claims the
/// event so the host page's own click handling for that region stays quiet.
#[derive(Debug, Default, Clone)]
pub struct ClickEvent {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
