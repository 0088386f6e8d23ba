//! PowerShell host adapter
//!
//! Runs one long-lived `pwsh` child process with an unrestricted
//! execution policy and speaks a line-delimited JSON protocol with a
//! small driver loop. Definitions are evaluated into the driver's
//! session scope, so functions registered by one request stay available
//! to every later invocation; invocations splat the named arguments onto
//! the function.
//!
//! Error coupling matches the session contract: if the host reports any
//! error record for a request, the whole request fails with the joined
//! diagnostics and no records are returned.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CommandHost, HostResult};
use scriptdeck_core::errors::SessionError;
use scriptdeck_core_types::ParamValue;

/// Protocol marker distinguishing driver responses from anything a
/// loaded script may print to stdout on its own.
const RESPONSE_MARKER: &str = "#scriptdeck#";

/// Driver loop executed by the child process. Reads one JSON request per
/// line on stdin, answers one marked JSON response per line on stdout.
const DRIVER: &str = r#"
$ErrorActionPreference = 'Continue'
while ($null -ne ($line = [Console]::In.ReadLine())) {
    if ([string]::IsNullOrWhiteSpace($line)) { continue }
    $req = $line | ConvertFrom-Json
    $records = @()
    $diags = @()
    try {
        if ($req.op -eq 'load') {
            $Error.Clear()
            Invoke-Expression $req.source | Out-Null
            foreach ($e in $Error) { $diags += $e.ToString() }
        }
        elseif ($req.op -eq 'invoke') {
            $splat = @{}
            if ($null -ne $req.parameters) {
                foreach ($p in $req.parameters.PSObject.Properties) {
                    $splat[$p.Name] = $p.Value
                }
            }
            $Error.Clear()
            $out = & $req.function @splat 2>&1
            foreach ($item in @($out)) {
                if ($item -is [System.Management.Automation.ErrorRecord]) {
                    $diags += $item.ToString()
                }
                else {
                    $records += ,$item
                }
            }
            foreach ($e in $Error) {
                $text = $e.ToString()
                if ($diags -notcontains $text) { $diags += $text }
            }
        }
        else {
            $diags += "unknown op: $($req.op)"
        }
    }
    catch {
        $diags += $_.ToString()
    }
    if ($diags.Count -gt 0) { $records = @() }
    $resp = [ordered]@{
        ok          = ($diags.Count -eq 0)
        records     = @($records)
        diagnostics = @($diags)
    }
    $json = ConvertTo-Json -InputObject $resp -Depth 8 -Compress
    [Console]::Out.WriteLine('#scriptdeck#' + $json)
}
"#;

#[derive(Serialize)]
struct DriverRequest<'a> {
    op: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct DriverResponse {
    ok: bool,
    #[serde(default)]
    records: Vec<Value>,
    #[serde(default)]
    diagnostics: Vec<String>,
}

/// A PowerShell execution context behind the [`CommandHost`] contract.
#[derive(Debug)]
pub struct PwshHost {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
}

impl PwshHost {
    /// Start a `pwsh` child process as the execution context.
    ///
    /// # Errors
    ///
    /// `SessionOpenFailure` when the process cannot be spawned or its
    /// pipes cannot be taken.
    pub fn spawn() -> Result<Self, SessionError> {
        Self::spawn_program("pwsh")
    }

    /// Start a specific PowerShell executable (`pwsh`, `powershell`, or
    /// a test stand-in honoring the same protocol).
    pub fn spawn_program(program: &str) -> Result<Self, SessionError> {
        let open_failure = |message: String| SessionError::SessionOpenFailure { message };

        let mut child = Command::new(program)
            .args([
                "-NoProfile",
                "-NonInteractive",
                "-NoLogo",
                "-ExecutionPolicy",
                "Bypass",
                "-Command",
                DRIVER,
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| open_failure(format!("failed to start {}: {}", program, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| open_failure("host stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| open_failure("host stdout unavailable".to_string()))?;

        tracing::info!(program, "host process started");

        Ok(Self {
            child,
            stdin: Some(stdin),
            stdout: BufReader::new(stdout),
        })
    }

    /// One request/response exchange with the driver loop.
    fn roundtrip(&mut self, request: &DriverRequest<'_>) -> HostResult<DriverResponse> {
        let io_err = |e: std::io::Error| vec![format!("host I/O failure: {}", e)];

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| vec!["host already shut down".to_string()])?;
        let mut line = serde_json::to_string(request)
            .map_err(|e| vec![format!("host request encoding failure: {}", e)])?;
        line.push('\n');
        stdin.write_all(line.as_bytes()).map_err(io_err)?;
        stdin.flush().map_err(io_err)?;

        // Skip anything a loaded script prints directly to stdout; only
        // marked lines belong to the protocol.
        let mut buf = String::new();
        loop {
            buf.clear();
            let n = self.stdout.read_line(&mut buf).map_err(io_err)?;
            if n == 0 {
                return Err(vec!["host process ended unexpectedly".to_string()]);
            }
            if let Some(payload) = buf.trim_end().strip_prefix(RESPONSE_MARKER) {
                return serde_json::from_str(payload)
                    .map_err(|e| vec![format!("host response decoding failure: {}", e)]);
            }
        }
    }
}

impl CommandHost for PwshHost {
    fn load_definitions(&mut self, source: &str) -> HostResult<()> {
        let response = self.roundtrip(&DriverRequest {
            op: "load",
            source: Some(source),
            function: None,
            parameters: None,
        })?;
        if response.ok {
            Ok(())
        } else {
            Err(response.diagnostics)
        }
    }

    fn invoke(&mut self, function: &str, args: &[(String, ParamValue)]) -> HostResult<Vec<Value>> {
        let parameters: Map<String, Value> = args
            .iter()
            .map(|(name, value)| {
                let json = match value {
                    ParamValue::Text(s) => Value::String(s.clone()),
                    ParamValue::Number(n) => serde_json::Number::from_f64(*n)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                    ParamValue::Flag(b) => Value::Bool(*b),
                };
                (name.clone(), json)
            })
            .collect();

        let response = self.roundtrip(&DriverRequest {
            op: "invoke",
            source: None,
            function: Some(function),
            parameters: Some(parameters),
        })?;
        if response.ok {
            Ok(response.records)
        } else {
            Err(response.diagnostics)
        }
    }

    fn shutdown(&mut self) {
        if self.stdin.take().is_some() {
            // Closing stdin ends the driver loop; reap the child so it
            // does not linger as a zombie.
            let _ = self.child.wait();
            tracing::info!("host process released");
        }
    }
}

impl Drop for PwshHost {
    fn drop(&mut self) {
        if self.stdin.is_some() {
            self.shutdown();
        }
    }
}
