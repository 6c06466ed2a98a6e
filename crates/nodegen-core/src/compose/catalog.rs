//! Catalog of every file the generator can emit
//!
//! Each unit pairs an output path with the condition under which it is
//! emitted and the content it renders. The catalog is static; per-run state
//! lives in the builders used by the render functions.

use super::{app, entry, manifest, RenderContext};
use crate::flags::FeatureFlags;

/// Identifies what a generated file is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    EntryPoint,
    AppModule,
    Constants,
    PackageManifest,
    EnvFile,
    DbConnector,
    AllowedOrigins,
    CorsConfig,
    CredentialsMiddleware,
    Logger,
    LogFile,
    AsyncHandler,
    ApiResponse,
    ApiError,
    FormatterConfig,
    FormatterIgnore,
    GitIgnore,
    GitAttributes,
    PublicTempPlaceholder,
}

impl FileKind {
    pub fn id(self) -> &'static str {
        match self {
            FileKind::EntryPoint => "entry-point",
            FileKind::AppModule => "app-module",
            FileKind::Constants => "constants-module",
            FileKind::PackageManifest => "package-manifest",
            FileKind::EnvFile => "env-file",
            FileKind::DbConnector => "db-connector",
            FileKind::AllowedOrigins => "allowed-origins",
            FileKind::CorsConfig => "cors-config",
            FileKind::CredentialsMiddleware => "credentials-middleware",
            FileKind::Logger => "logger-module",
            FileKind::LogFile => "log-file",
            FileKind::AsyncHandler => "async-handler",
            FileKind::ApiResponse => "api-response",
            FileKind::ApiError => "api-error",
            FileKind::FormatterConfig => "formatter-config",
            FileKind::FormatterIgnore => "formatter-ignore",
            FileKind::GitIgnore => "ignore-file",
            FileKind::GitAttributes => "attributes-file",
            FileKind::PublicTempPlaceholder => "public-temp-placeholder",
        }
    }
}

/// Where a unit's content comes from
#[derive(Clone, Copy)]
pub enum Content {
    Static(&'static str),
    Rendered(fn(&RenderContext<'_>) -> String),
}

/// One entry of the catalog
#[derive(Clone, Copy)]
pub struct TemplateUnit {
    pub kind: FileKind,
    /// Output path relative to the project root, `/` separated
    pub path: &'static str,
    pub emit_when: fn(&FeatureFlags) -> bool,
    pub content: Content,
}

impl TemplateUnit {
    pub fn is_emitted(&self, flags: &FeatureFlags) -> bool {
        (self.emit_when)(flags)
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        match self.content {
            Content::Static(text) => text.to_string(),
            Content::Rendered(render) => render(ctx),
        }
    }
}

impl std::fmt::Debug for TemplateUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateUnit")
            .field("kind", &self.kind.id())
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn always(_: &FeatureFlags) -> bool {
    true
}
fn env_file(f: &FeatureFlags) -> bool {
    f.use_env_file
}
fn mongodb(f: &FeatureFlags) -> bool {
    f.connect_mongodb
}
fn cors(f: &FeatureFlags) -> bool {
    f.use_cors
}
fn logging(f: &FeatureFlags) -> bool {
    f.use_morgan_winston
}
fn helpers(f: &FeatureFlags) -> bool {
    f.use_res_err_async_handler
}
fn prettier(f: &FeatureFlags) -> bool {
    f.use_prettier
}
fn github(f: &FeatureFlags) -> bool {
    f.use_github
}

static CATALOG: &[TemplateUnit] = &[
    TemplateUnit {
        kind: FileKind::PackageManifest,
        path: "package.json",
        emit_when: always,
        content: Content::Rendered(manifest::render),
    },
    TemplateUnit {
        kind: FileKind::EntryPoint,
        path: "src/index.js",
        emit_when: always,
        content: Content::Rendered(entry::render),
    },
    TemplateUnit {
        kind: FileKind::AppModule,
        path: "src/app.js",
        emit_when: always,
        content: Content::Rendered(app::render),
    },
    TemplateUnit {
        kind: FileKind::Constants,
        path: "src/constants.js",
        emit_when: always,
        content: Content::Rendered(render_constants),
    },
    TemplateUnit {
        kind: FileKind::EnvFile,
        path: ".env",
        emit_when: env_file,
        content: Content::Rendered(render_env_file),
    },
    TemplateUnit {
        kind: FileKind::DbConnector,
        path: "src/db/index.js",
        emit_when: mongodb,
        content: Content::Rendered(render_db_connector),
    },
    TemplateUnit {
        kind: FileKind::AllowedOrigins,
        path: "src/config/allowedOrigins.js",
        emit_when: cors,
        content: Content::Static(ALLOWED_ORIGINS),
    },
    TemplateUnit {
        kind: FileKind::CorsConfig,
        path: "src/config/corsOptions.js",
        emit_when: cors,
        content: Content::Static(CORS_OPTIONS),
    },
    TemplateUnit {
        kind: FileKind::CredentialsMiddleware,
        path: "src/middlewares/credentials.js",
        emit_when: cors,
        content: Content::Static(CREDENTIALS),
    },
    TemplateUnit {
        kind: FileKind::Logger,
        path: "src/utils/logger.js",
        emit_when: logging,
        content: Content::Static(LOGGER),
    },
    TemplateUnit {
        kind: FileKind::LogFile,
        path: "src/logs/app.log",
        emit_when: logging,
        content: Content::Static(""),
    },
    TemplateUnit {
        kind: FileKind::AsyncHandler,
        path: "src/utils/asyncHandler.js",
        emit_when: helpers,
        content: Content::Static(ASYNC_HANDLER),
    },
    TemplateUnit {
        kind: FileKind::ApiResponse,
        path: "src/utils/ApiResponse.js",
        emit_when: helpers,
        content: Content::Static(API_RESPONSE),
    },
    TemplateUnit {
        kind: FileKind::ApiError,
        path: "src/utils/ApiError.js",
        emit_when: helpers,
        content: Content::Static(API_ERROR),
    },
    TemplateUnit {
        kind: FileKind::FormatterConfig,
        path: ".prettierrc",
        emit_when: prettier,
        content: Content::Static(PRETTIER_CONFIG),
    },
    TemplateUnit {
        kind: FileKind::FormatterIgnore,
        path: ".prettierignore",
        emit_when: prettier,
        content: Content::Static(PRETTIER_IGNORE),
    },
    TemplateUnit {
        kind: FileKind::GitIgnore,
        path: ".gitignore",
        emit_when: github,
        content: Content::Static(GITIGNORE),
    },
    TemplateUnit {
        kind: FileKind::GitAttributes,
        path: ".gitattributes",
        emit_when: github,
        content: Content::Static(GITATTRIBUTES),
    },
    TemplateUnit {
        kind: FileKind::PublicTempPlaceholder,
        path: "public/temp/.gitkeep",
        emit_when: github,
        content: Content::Static(""),
    },
];

/// Every unit the generator knows about
pub fn units() -> &'static [TemplateUnit] {
    CATALOG
}

/// Look up the unit for a file kind
#[cfg(test)]
pub fn unit(kind: FileKind) -> Option<&'static TemplateUnit> {
    CATALOG.iter().find(|unit| unit.kind == kind)
}

fn render_constants(ctx: &RenderContext<'_>) -> String {
    if ctx.flags.connect_mongodb {
        "export const DB_NAME = \"NodeJSProject\";\n".to_string()
    } else {
        String::new()
    }
}

fn render_env_file(ctx: &RenderContext<'_>) -> String {
    let mut lines = vec!["PORT = 8080"];
    if ctx.flags.connect_mongodb {
        lines.push("MONGODB_URI = mongodb://127.0.0.1:27017");
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_db_connector(ctx: &RenderContext<'_>) -> String {
    let uri = if ctx.flags.use_env_file {
        "`${process.env.MONGODB_URI}/${DB_NAME}`"
    } else {
        "`mongodb://127.0.0.1:27017/${DB_NAME}`"
    };
    DB_CONNECTOR.replace("{uri}", uri)
}

const DB_CONNECTOR: &str = r#"import mongoose from "mongoose";
import { DB_NAME } from "../constants.js";

const connectDB = async () => {
  try {
    const connectionInstance = await mongoose.connect(
      {uri}
    );
    console.log(`\nMongoDB connected !!\nDB HOST: ${connectionInstance.connection.host}`);
  } catch (error) {
    console.log("MONGODB connection FAILED:", error);
    process.exit(1);
  }
};

export default connectDB;
"#;

const ALLOWED_ORIGINS: &str = r#"const allowedOrigins = [
  "https://www.yoursite.com",
  "http://localhost:5173",
];

export { allowedOrigins };
"#;

const CORS_OPTIONS: &str = r#"import { allowedOrigins } from "./allowedOrigins.js";

const corsOptions = {
  origin: (origin, callback) => {
    if (allowedOrigins.indexOf(origin) !== -1 || !origin) {
      callback(null, true);
    } else {
      callback(new Error("Not allowed by CORS"));
    }
  },
  // credentials: true,
  optionsSuccessStatus: 200,
};

export { corsOptions };
"#;

const CREDENTIALS: &str = r#"import { allowedOrigins } from "../config/allowedOrigins.js";

const credentials = (req, res, next) => {
  const origin = req.headers.origin;
  if (allowedOrigins.includes(origin)) {
    res.header("Access-Control-Allow-Credentials", true);
  }
  next();
};

export { credentials };
"#;

const LOGGER: &str = r#"import { createLogger, format, transports } from "winston";
const { combine, timestamp, json, colorize } = format;

// Console output is colorized; the log file keeps JSON lines
const consoleLogFormat = format.combine(
  format.colorize(),
  format.printf(({ level, message, timestamp }) => {
    return `${timestamp} | ${level}: ${message}`;
  })
);

const logger = createLogger({
  level: "info",
  format: combine(colorize(), timestamp(), json()),
  transports: [
    new transports.Console({
      format: consoleLogFormat,
    }),
    new transports.File({ filename: "src/logs/app.log" }),
  ],
});

export default logger;
"#;

const ASYNC_HANDLER: &str = r#"const asyncHandler = (requestHandler) => async (req, res, next) => {
  try {
    await requestHandler(req, res, next);
  } catch (error) {
    const statusCode = error.statusCode || 500;
    res.status(statusCode).json({
      success: false,
      message: error.message,
    });
  }
};

export { asyncHandler };
"#;

const API_RESPONSE: &str = r#"class ApiResponse {
  constructor(statusCode, data, message = "success") {
    this.statusCode = statusCode;
    this.data = data;
    this.message = message;
    this.success = statusCode < 400;
  }
}

export { ApiResponse };
"#;

const API_ERROR: &str = r#"class ApiError extends Error {
  constructor(
    statusCode,
    message = "Something went wrong",
    errors = [],
    stack = ""
  ) {
    super(message);
    this.statusCode = statusCode;
    this.data = null;
    this.message = message;
    this.success = false;
    this.errors = errors;

    if (stack) {
      this.stack = stack;
    } else {
      Error.captureStackTrace(this, this.constructor);
    }
  }
}

export { ApiError };
"#;

const PRETTIER_CONFIG: &str = r#"{
  "singleQuote": false,
  "bracketSpacing": true,
  "tabWidth": 2,
  "trailingComma": "es5",
  "semi": true
}
"#;

const PRETTIER_IGNORE: &str = r#"/.vscode
/node_modules
./dist

*.env
.env
.env.*
"#;

const GITATTRIBUTES: &str = r#"# Auto detect text files and perform LF normalization
* text=auto
"#;

const GITIGNORE: &str = r#"# Logs
logs
*.log
npm-debug.log*
yarn-debug.log*
yarn-error.log*
lerna-debug.log*
.pnpm-debug.log*

# Diagnostic reports (https://nodejs.org/api/report.html)
report.[0-9]*.[0-9]*.[0-9]*.[0-9]*.json

# Runtime data
pids
*.pid
*.seed
*.pid.lock

# Directory for instrumented libs generated by jscoverage/JSCover
lib-cov

# Coverage directory used by tools like istanbul
coverage
*.lcov

# nyc test coverage
.nyc_output

# Grunt intermediate storage (https://gruntjs.com/creating-plugins#storing-task-files)
.grunt

# Bower dependency directory (https://bower.io/)
bower_components

# node-waf configuration
.lock-wscript

# Compiled binary addons (https://nodejs.org/api/addons.html)
build/Release

# Dependency directories
node_modules/
jspm_packages/

# Snowpack dependency directory (https://snowpack.dev/)
web_modules/

# TypeScript cache
*.tsbuildinfo

# Optional npm cache directory
.npm

# Optional eslint cache
.eslintcache

# Microbundle cache
.rpt2_cache/
.rts2_cache_cjs/
.rts2_cache_es/
.rts2_cache_umd/

# Optional REPL history
.node_repl_history

# Output of 'npm pack'
*.tgz

# Yarn Integrity file
.yarn-integrity

# dotenv environment variables file
.env
.env.test
.env.production

# parcel-bundler cache (https://parceljs.org/)
.cache
.parcel-cache

# Next.js build output
.next
out

# Nuxt.js build / generate output
.nuxt
dist

# Gatsby files
.cache/
# Comment in the public line in if your project uses Gatsby and not Next.js
# https://nextjs.org/blog/next-9-1#public-directory-support
# public

# vuepress build output
.vuepress/dist

# Serverless directories
.serverless/

# FuseBox cache
.fusebox/

# DynamoDB Local files
.dynamodb/

# TernJS port file
.tern-port

# Stores VSCode versions used for testing VSCode extensions
.vscode-test

# yarn v2
.yarn/cache
.yarn/unplugged
.yarn/build-state.yml
.yarn/install-state.gz
.pnp.*

# End of https://mrkandreev.name/snippets/gitignore-generator/#Node
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_and_kinds_are_unique() {
        let paths: HashSet<_> = units().iter().map(|u| u.path).collect();
        let kinds: HashSet<_> = units().iter().map(|u| u.kind).collect();
        assert_eq!(paths.len(), units().len());
        assert_eq!(kinds.len(), units().len());
    }

    #[test]
    fn test_paths_are_relative() {
        for unit in units() {
            assert!(!unit.path.starts_with('/'), "{}", unit.path);
            assert!(!unit.path.contains(".."), "{}", unit.path);
            assert!(!unit.path.contains('\\'), "{}", unit.path);
        }
    }

    #[test]
    fn test_lookup_by_kind() {
        let unit = unit(FileKind::CorsConfig).unwrap();
        assert_eq!(unit.path, "src/config/corsOptions.js");
        assert_eq!(unit.kind.id(), "cors-config");
    }

    #[test]
    fn test_gitignore_keeps_full_node_template() {
        for section in [
            "# Grunt intermediate storage",
            "# Bower dependency directory",
            "# node-waf configuration",
            "# Snowpack dependency directory",
            "# Microbundle cache",
            "# Next.js build output",
            "# Nuxt.js build / generate output",
            "# Gatsby files",
            "# vuepress build output",
            "# FuseBox cache",
            "# TernJS port file",
        ] {
            assert!(GITIGNORE.contains(section), "missing {section}");
        }
        assert!(GITIGNORE.ends_with("# End of https://mrkandreev.name/snippets/gitignore-generator/#Node\n"));
    }

    #[test]
    fn test_cors_options_hint_credentials_toggle() {
        assert!(CORS_OPTIONS.contains("  // credentials: true,\n  optionsSuccessStatus: 200,"));
    }

    #[test]
    fn test_debug_shows_kind_id() {
        let unit = unit(FileKind::GitIgnore).unwrap();
        assert!(format!("{unit:?}").contains("\"ignore-file\""));
    }

    #[test]
    fn test_cors_units_import_each_other_by_emitted_paths() {
        assert!(CORS_OPTIONS.contains(r#"from "./allowedOrigins.js""#));
        assert!(CREDENTIALS.contains(r#"from "../config/allowedOrigins.js""#));
    }
}
