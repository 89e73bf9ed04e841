//! The session driver: dumps several values into one Go source text.

use std::io;

use kew_value::Value;

use crate::{Config, Dependencies, Result, dumper::Dumper};

/// Rendered output of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    /// Package clause, import block and one declaration per value.
    pub text: String,
    /// Every package the declarations refer to.
    pub dependencies: Dependencies,
}

/// Dumps values with a fixed configuration.
///
/// Each value is rendered by a fresh dumper (fresh pointer chain, depth 0)
/// into its own buffer, so the merged import block can precede all
/// declarations.
///
/// # Example
///
/// ```
/// use kew_dump::{Config, Session};
/// use kew_value::Value;
///
/// let output = Session::new(Config::new("fixtures")).render(&[Value::int(3)]);
///
/// assert_eq!(output.text, "package fixtures\n\nvar _ = 3\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render `values` into a single source text.
    ///
    /// Invalid values and nil interfaces are skipped silently.
    pub fn render(&self, values: &[Value]) -> Output {
        let mut dependencies = Dependencies::new();
        let mut decls = Vec::with_capacity(values.len());

        for (index, value) in values.iter().enumerate() {
            let mut text = String::new();
            let mut dumper = Dumper::new(&self.config, &mut text);
            // Writing to a String cannot fail.
            let written = dumper.dump_top(value).unwrap_or(false);
            let deps = dumper.into_dependencies();
            if !written {
                tracing::debug!(index, "skipped value without a type");
                continue;
            }
            tracing::debug!(index, ty = %value.unpack().ty(), bytes = text.len(), "rendered value");
            dependencies.merge(&deps);
            decls.push(text);
        }

        let mut text = String::new();
        if let Some(package) = &self.config.package {
            text.push_str(&format!("package {}\n\n", package));
        }
        text.push_str(&dependencies.render());
        for decl in decls {
            text.push_str(&decl);
        }
        Output { text, dependencies }
    }

    /// Render `values` and write the text to `writer`.
    pub fn write_to<W: io::Write>(&self, writer: &mut W, values: &[Value]) -> Result<Dependencies> {
        let output = self.render(values);
        writer.write_all(output.text.as_bytes())?;
        Ok(output.dependencies)
    }
}

/// Render `values` with the default configuration.
pub fn sdump(values: &[Value]) -> String {
    Session::default().render(values).text
}

/// Write `values` to `writer` with the default configuration.
pub fn fdump<W: io::Write>(writer: &mut W, values: &[Value]) -> Result<()> {
    Session::default().write_to(writer, values)?;
    Ok(())
}
