/// Display name used when the source text does not carry one
pub const UNKNOWN_NAME: &str = "Unknown";

/// Attribute keys understood on a metadata line, in the order they are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    TvgId,
    TvgName,
    TvgLogo,
    GroupTitle,
}

impl Attribute {
    pub const ALL: [Self; 4] = [Self::TvgId, Self::TvgName, Self::TvgLogo, Self::GroupTitle];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TvgId => "tvg-id",
            Self::TvgName => "tvg-name",
            Self::TvgLogo => "tvg-logo",
            Self::GroupTitle => "group-title",
        }
    }
}

/// A single playable stream
///
/// Fields are only readable after construction. Optional guide attributes are
/// set through the consuming `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEntry {
    name: String,
    url: String,
    tvg_id: String,
    /// `None` until a non-empty override is given, `tvg_name()` then reports `name`
    tvg_name: Option<String>,
    tvg_logo: String,
    group_title: String,
}

impl StreamEntry {
    /// Returns `None` when `url` is empty, such an entry can never be played
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        if url.is_empty() {
            return None;
        }

        Some(Self {
            name: name.into(),
            url,
            tvg_name: None,
            tvg_id: String::new(),
            tvg_logo: String::new(),
            group_title: String::new(),
        })
    }

    #[must_use]
    pub fn with_tvg_id(mut self, tvg_id: impl Into<String>) -> Self {
        self.tvg_id = tvg_id.into();
        self
    }

    /// An empty value keeps the display name as guide name
    #[must_use]
    pub fn with_tvg_name(mut self, tvg_name: impl Into<String>) -> Self {
        let tvg_name = tvg_name.into();
        self.tvg_name = (!tvg_name.is_empty()).then_some(tvg_name);
        self
    }

    #[must_use]
    pub fn with_tvg_logo(mut self, tvg_logo: impl Into<String>) -> Self {
        self.tvg_logo = tvg_logo.into();
        self
    }

    #[must_use]
    pub fn with_group_title(mut self, group_title: impl Into<String>) -> Self {
        self.group_title = group_title.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn tvg_id(&self) -> &str {
        &self.tvg_id
    }

    #[must_use]
    pub fn tvg_name(&self) -> &str {
        self.tvg_name.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn tvg_logo(&self) -> &str {
        &self.tvg_logo
    }

    #[must_use]
    pub fn group_title(&self) -> &str {
        &self.group_title
    }

    /// Value written for `attribute` on the metadata line
    ///
    /// Unlike [`Self::tvg_name`] this is empty when no guide name override was given.
    #[must_use]
    pub fn attribute(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::TvgId => &self.tvg_id,
            Attribute::TvgName => self.tvg_name.as_deref().unwrap_or_default(),
            Attribute::TvgLogo => &self.tvg_logo,
            Attribute::GroupTitle => &self.group_title,
        }
    }
}
