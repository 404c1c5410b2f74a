/// Where the user currently is: the active group (server) and channel, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationContext {
    pub group: Option<String>,
    pub channel: Option<String>,
}

impl NavigationContext {
    pub fn new(group: Option<String>, channel: Option<String>) -> Self {
        Self { group, channel }
    }

    /// Window title for this context, prefixed with `base`.
    #[must_use]
    pub fn title(&self, base: &str) -> String {
        match (&self.group, &self.channel) {
            (Some(group), Some(channel)) => format!("{base} @ {group} # {channel}"),
            (Some(group), None) => format!("{base} @ {group}"),
            _ => base.to_string(),
        }
    }

    #[must_use]
    pub fn has_channel(&self) -> bool {
        self.group.is_some() && self.channel.is_some()
    }
}
