//! # Route Table
//!
//! Static route descriptors and path resolution.

/// Path of the login page; unauthenticated navigations are sent here.
pub const LOGIN_PATH: &str = "/login";

/// Path of the home page; authenticated visits to the login page are sent here.
pub const HOME_PATH: &str = "/";

/// Pages the routes render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    UserList,
    ProductList,
}

impl Page {
    /// Get page title for header display
    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Login => "Sign In",
            Page::UserList => "Users",
            Page::ProductList => "Products",
        }
    }
}

/// Static route configuration. Never mutated after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub page: Page,
    pub requires_auth: bool,
}

/// A path resolved against the table.
///
/// `matched` is empty for unknown paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub path: String,
    pub matched: Vec<RouteDescriptor>,
}

impl RouteMatch {
    /// True when any matched record requires authentication.
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|route| route.requires_auth)
    }

    pub fn page(&self) -> Option<Page> {
        self.matched.last().map(|route| route.page)
    }

    pub fn name(&self) -> Option<&'static str> {
        self.matched.last().map(|route| route.name)
    }

    pub fn is_login(&self) -> bool {
        self.path == LOGIN_PATH
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![
            RouteDescriptor {
                path: HOME_PATH,
                name: "Home",
                page: Page::Home,
                requires_auth: true,
            },
            RouteDescriptor {
                path: LOGIN_PATH,
                name: "Login",
                page: Page::Login,
                requires_auth: false,
            },
            RouteDescriptor {
                path: "/users",
                name: "UserList",
                page: Page::UserList,
                requires_auth: true,
            },
            RouteDescriptor {
                path: "/products",
                name: "ProductList",
                page: Page::ProductList,
                requires_auth: true,
            },
        ])
    }
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// Resolve `path` to the records it matches.
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let path = normalize_path(path);
        let matched = self
            .routes
            .iter()
            .filter(|route| route.path == path)
            .cloned()
            .collect();
        RouteMatch { path, matched }
    }
}

/// Strip query and fragment and drop a trailing slash (except on the root).
pub fn normalize_path(path: &str) -> String {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return HOME_PATH.to_string();
    }

    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
