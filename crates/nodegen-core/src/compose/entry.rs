//! Entry point (`src/index.js`) composition
//!
//! How the server starts depends only on whether the port comes from the
//! environment and whether a database connection must be awaited first. The
//! four resulting shapes are spelled out in full rather than stitched together.

use super::builder::SourceBuilder;
use super::RenderContext;

/// Server start sequence for the entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartShape {
    /// Port from the environment, connect to MongoDB, then listen
    EnvConnectThenListen,
    /// Literal port, connect to MongoDB, then listen
    LiteralConnectThenListen,
    /// Port from the environment, listen immediately
    EnvListen,
    /// Literal port, listen immediately
    LiteralListen,
}

impl StartShape {
    pub fn select(use_env_file: bool, connect_mongodb: bool) -> Self {
        match (use_env_file, connect_mongodb) {
            (true, true) => StartShape::EnvConnectThenListen,
            (false, true) => StartShape::LiteralConnectThenListen,
            (true, false) => StartShape::EnvListen,
            (false, false) => StartShape::LiteralListen,
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            StartShape::EnvConnectThenListen => ENV_CONNECT_THEN_LISTEN,
            StartShape::LiteralConnectThenListen => LITERAL_CONNECT_THEN_LISTEN,
            StartShape::EnvListen => ENV_LISTEN,
            StartShape::LiteralListen => LITERAL_LISTEN,
        }
    }
}

const ENV_CONNECT_THEN_LISTEN: &str = r#"connectDB()
  .then(() => {
    app.listen(process.env.PORT || 8080, () => {
      console.log(`⚙️ Server is running at port : ${process.env.PORT}`);
    });
  }).catch((err) => {
    console.log("MongoDB connection failed !!! ", err);
  });"#;

const LITERAL_CONNECT_THEN_LISTEN: &str = r#"const PORT = 8080;

connectDB()
  .then(() => {
    app.listen(8080, () => {
      console.log(`⚙️ Server is running at port : ${PORT}`);
    });
  }).catch((err) => {
    console.log("MongoDB connection failed !!! ", err);
  });"#;

const ENV_LISTEN: &str = r#"app.listen(process.env.PORT || 8080, () => {
  console.log(`⚙️ Server is running at port : ${process.env.PORT}`);
});"#;

const LITERAL_LISTEN: &str = r#"const PORT = 8080;

app.listen(PORT, () => {
  console.log(`⚙️ Server is running at port : ${PORT}`);
});"#;

pub(crate) fn render(ctx: &RenderContext<'_>) -> String {
    let flags = ctx.flags;
    let mut source = SourceBuilder::new();

    source.import(r#"import { app } from "./app.js";"#);
    if flags.use_env_file {
        source.import(r#"import dotenv from "dotenv";"#);
    }
    if flags.connect_mongodb {
        source.import(r#"import connectDB from "./db/index.js";"#);
    }

    if flags.use_env_file {
        source.block(r#"dotenv.config({ path: "./.env" });"#);
    }
    source.block(StartShape::select(flags.use_env_file, flags.connect_mongodb).source());

    source.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_flag_pair_selects_distinct_shape() {
        let shapes = [
            StartShape::select(true, true),
            StartShape::select(false, true),
            StartShape::select(true, false),
            StartShape::select(false, false),
        ];
        for (i, a) in shapes.iter().enumerate() {
            for b in &shapes[i + 1..] {
                assert_ne!(a, b);
                assert_ne!(a.source(), b.source());
            }
        }
    }

    #[test]
    fn test_literal_shapes_declare_port_before_use() {
        for shape in [StartShape::LiteralListen, StartShape::LiteralConnectThenListen] {
            let src = shape.source();
            assert!(src.starts_with("const PORT = 8080;"));
            assert!(src.contains("Server is running at port : ${PORT}"));
            assert!(!src.contains("process.env"));
        }
        assert!(StartShape::LiteralListen
            .source()
            .contains("app.listen(PORT, () => {"));
        assert!(StartShape::LiteralConnectThenListen
            .source()
            .contains("app.listen(8080, () => {"));
    }

    #[test]
    fn test_connect_shapes_chain_catch_on_then() {
        for shape in [
            StartShape::EnvConnectThenListen,
            StartShape::LiteralConnectThenListen,
        ] {
            let src = shape.source();
            assert!(src.contains("    });\n  }).catch((err) => {\n"), "{src}");
            assert!(src.ends_with("  });"));
        }
    }

    #[test]
    fn test_env_shapes_read_port_from_environment() {
        for shape in [StartShape::EnvListen, StartShape::EnvConnectThenListen] {
            let src = shape.source();
            assert!(src.contains("app.listen(process.env.PORT || 8080, () => {"));
            assert!(src.contains("Server is running at port : ${process.env.PORT}`"));
            assert!(!src.contains("const PORT"));
        }
    }

    #[test]
    fn test_only_database_shapes_connect_first() {
        assert!(StartShape::EnvConnectThenListen.source().starts_with("connectDB()"));
        assert!(StartShape::LiteralConnectThenListen
            .source()
            .contains("\nconnectDB()\n  .then(() => {"));
        assert!(!StartShape::EnvListen.source().contains("connectDB"));
        assert!(!StartShape::LiteralListen.source().contains("connectDB"));
    }
}
