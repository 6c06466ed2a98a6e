//! Ordered line builders used to assemble generated source files
//!
//! Each generated file gets its own builder for the duration of one run, so
//! nothing accumulates across runs.

use std::collections::BTreeSet;

/// An `app.use(...)` registration in the generated Express app.
///
/// Variant order is pipeline order: the derived `Ord` decides where a line
/// lands, not the order in which features register it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Middleware {
    RequestLogging,
    Credentials,
    Cors,
    JsonBody,
    UrlEncodedBody,
    StaticAssets,
}

impl Middleware {
    pub fn source(self) -> &'static str {
        match self {
            Middleware::RequestLogging => REQUEST_LOGGING,
            Middleware::Credentials => "app.use(credentials);",
            Middleware::Cors => "app.use(cors(corsOptions));",
            Middleware::JsonBody => r#"app.use(express.json({ limit: "16kb" }));"#,
            Middleware::UrlEncodedBody => {
                r#"app.use(express.urlencoded({ extended: true, limit: "16kb" }));"#
            }
            Middleware::StaticAssets => r#"app.use(express.static("public"));"#,
        }
    }
}

const REQUEST_LOGGING: &str = r#"app.use(
  morgan(morganFormat, {
    stream: {
      write: (message) => {
        const logObject = {
          method: message.split(" ")[0],
          url: message.split(" ")[1],
          status: message.split(" ")[2],
          responseTime: message.split(" ")[3],
        };
        logger.info(JSON.stringify(logObject));
      },
    },
  })
);"#;

/// Set of middleware registrations, always rendered in pipeline order
#[derive(Debug, Clone, Default)]
pub struct MiddlewareStack {
    entries: BTreeSet<Middleware>,
}

impl MiddlewareStack {
    /// Body parsers and static assets are part of every generated app
    pub fn with_defaults() -> Self {
        let mut stack = Self::default();
        stack
            .register(Middleware::JsonBody)
            .register(Middleware::UrlEncodedBody)
            .register(Middleware::StaticAssets);
        stack
    }

    pub fn register(&mut self, middleware: Middleware) -> &mut Self {
        self.entries.insert(middleware);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = Middleware> + '_ {
        self.entries.iter().copied()
    }

    pub fn render(&self) -> String {
        self.iter()
            .map(Middleware::source)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A JS module: an import header followed by blank-line separated blocks
#[derive(Debug, Clone, Default)]
pub struct SourceBuilder {
    imports: Vec<String>,
    blocks: Vec<String>,
}

impl SourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an import line; repeated imports are kept once
    pub fn import(&mut self, line: impl Into<String>) -> &mut Self {
        let line = line.into();
        if !self.imports.contains(&line) {
            self.imports.push(line);
        }
        self
    }

    pub fn block(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(text.into());
        self
    }

    #[cfg(test)]
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn render(&self) -> String {
        let mut out = self.imports.join("\n");
        for block in &self.blocks {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(block);
        }
        out.push('\n');
        out
    }
}
