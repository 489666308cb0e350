/// The browser window (or whatever hosts the shell).
pub trait HostWindow: Send + Sync {
    /// Origin the application is served from, e.g. `https://app.example.org`.
    fn origin(&self) -> String;

    /// Scroll the viewport back to the top left.
    fn scroll_to_origin(&self);

    /// Navigate the whole window away from the application.
    fn redirect(&self, location: &str);
}
