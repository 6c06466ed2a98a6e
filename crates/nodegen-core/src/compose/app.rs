//! Express app module (`src/app.js`) composition

use super::builder::{Middleware, MiddlewareStack, SourceBuilder};
use super::RenderContext;

const MORGAN_FORMAT: &str = r#"const morganFormat = ":method :url :status :response-time ms";"#;

pub(crate) fn render(ctx: &RenderContext<'_>) -> String {
    let flags = ctx.flags;
    let mut source = SourceBuilder::new();
    let mut middleware = MiddlewareStack::with_defaults();

    source.import(r#"import express from "express";"#);

    if flags.use_cors {
        source
            .import(r#"import cors from "cors";"#)
            .import(r#"import { corsOptions } from "./config/corsOptions.js";"#)
            .import(r#"import { credentials } from "./middlewares/credentials.js";"#);
        middleware
            .register(Middleware::Credentials)
            .register(Middleware::Cors);
    }

    if flags.use_morgan_winston {
        source
            .import(r#"import morgan from "morgan";"#)
            .import(r#"import logger from "./utils/logger.js";"#);
        middleware.register(Middleware::RequestLogging);
    }

    source.block("const app = express();");
    if flags.use_morgan_winston {
        source.block(MORGAN_FORMAT);
    }
    source.block(middleware.render());
    source.block("export { app };");

    source.render()
}
