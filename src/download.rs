//! Fetching a server certificate with openssl.
//!
//! Two stages: `openssl s_client` connects and its output is captured in an
//! intermediate file, then `openssl x509` turns that capture into PEM. A
//! failed stage stops the pipeline.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::console::Console;
use crate::error::Result;
use crate::process::{Invocation, StdinSource, StdoutSink};

/// What `download` needs besides the target.
pub struct Downloader<'a> {
    pub openssl: &'a str,
    pub intermediate: &'a Path,
}

impl Downloader<'_> {
    /// The TLS probe for `host:port`. `q` on stdin ends the session once
    /// the handshake is printed.
    pub fn probe(&self, host: &str, port: u16) -> Invocation {
        Invocation::new(self.openssl)
            .args(["s_client", "-servername", host, "-connect"])
            .arg(format!("{}:{}", host, port))
            .stdin(StdinSource::Text("q".into()))
            .stdout(StdoutSink::File(self.intermediate.to_path_buf()))
    }

    /// Conversion of the captured handshake into a PEM certificate.
    pub fn convert(&self, pem_file: Option<&str>) -> Invocation {
        let mut invocation = Invocation::new(self.openssl)
            .args(["x509", "-outform", "pem"])
            .stdin(StdinSource::File(self.intermediate.to_path_buf()));
        if let Some(file) = pem_file {
            invocation = invocation.args(["-out", file]);
        }
        invocation
    }

    /// Download the certificate served at `host:port`, printing it or
    /// writing it to `pem_file`.
    ///
    /// Returns `Ok(false)` if the user declined to overwrite `pem_file`.
    pub fn download(
        &self,
        console: &mut Console,
        host: &str,
        port: u16,
        pem_file: Option<&str>,
    ) -> Result<bool> {
        let probe = self.probe(host, port);
        console.echo(&probe.command_line())?;

        if let Some(file) = pem_file
            && !console.confirm_overwrite(Path::new(file))?
        {
            return Ok(false);
        }

        let verb = if self.intermediate.exists() {
            "Overwriting"
        } else {
            "Writing"
        };
        writeln!(
            console.out(),
            "{} intermediate file '{}'",
            verb,
            self.intermediate.display()
        )?;
        console.execute(&probe)?;

        let convert = self.convert(pem_file);
        console.echo(&convert.command_line())?;
        console.execute(&convert)?;

        if let Some(file) = pem_file {
            info!("certificate from {}:{} written to {}", host, port, file);
            writeln!(console.out(), "Output to {}", file)?;
        }
        Ok(true)
    }
}
