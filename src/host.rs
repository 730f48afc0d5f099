/// What the widget needs from the page it runs in
pub trait Host {
    /// Full address currently shown in the address bar
    fn current_url(&self) -> String;

    fn current_title(&self) -> String;

    /// Change the address without reloading
    fn push_state(&self, url: &str);

    fn replace_state(&self, url: &str);

    /// Fire the native back/forward notification so the host router and
    /// any other popstate listener react
    fn dispatch_popstate(&self);

    /// Ask the user to confirm a destructive action
    fn confirm(&self, message: &str) -> bool;
}
