//! Service child process speaking JSON lines over stdio

use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};

use super::commands::RequestTracker;
use super::protocol::{build_request, parse_response, INTERFACE_METHOD};
use super::proxy::{Reply, ServiceProxy};
use callpane_core::prelude::*;
use callpane_core::{parse_interface, ServiceInterface};

/// Manages a service child process.
///
/// The `Child` handle is moved into a `wait_for_exit` background task. When
/// the process exits, every pending call fails with
/// [`Error::ServiceExited`]. Dropping the `ServiceProcess` kills the child.
pub struct ServiceProcess {
    /// Sender for request lines
    stdin_tx: mpsc::Sender<String>,
    tracker: Arc<RequestTracker>,
    /// Process ID for logging
    pid: Option<u32>,
    /// Tells the wait task to kill the process; consumed on drop
    kill_tx: Option<oneshot::Sender<()>>,
    /// Set by the wait task once the child has exited
    exited: Arc<AtomicBool>,
    /// The command line, for the header
    command: String,
}

impl ServiceProcess {
    /// Spawn `command[0]` with the remaining elements as arguments
    pub fn spawn(command: &[String]) -> Result<Self> {
        let Some((program, args)) = command.split_first() else {
            return Err(Error::ProcessSpawn {
                reason: "empty command".to_string(),
            });
        };
        let cmdline = command.join(" ");
        info!("Spawning service: {}", cmdline);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::ProcessSpawn {
                reason: format!("{}: {}", program, e),
            })?;

        let pid = child.id();
        info!("Service process started with PID: {:?}", pid);

        let (stdin, stdout, stderr) = match (child.stdin.take(), child.stdout.take(), child.stderr.take()) {
            (Some(stdin), Some(stdout), Some(stderr)) => (stdin, stdout, stderr),
            _ => {
                return Err(Error::ProcessSpawn {
                    reason: "service stdio was not captured".to_string(),
                })
            }
        };

        let tracker = Arc::new(RequestTracker::new());

        let (stdin_tx, stdin_rx) = mpsc::channel::<String>(32);
        tokio::spawn(Self::stdin_writer(stdin, stdin_rx));
        tokio::spawn(Self::stdout_reader(stdout, Arc::clone(&tracker)));
        tokio::spawn(Self::stderr_reader(stderr));

        let exited = Arc::new(AtomicBool::new(false));
        let (kill_tx, kill_rx) = oneshot::channel::<()>();
        tokio::spawn(Self::wait_for_exit(
            child,
            kill_rx,
            Arc::clone(&tracker),
            Arc::clone(&exited),
        ));

        Ok(Self {
            stdin_tx,
            tracker,
            pid,
            kill_tx: Some(kill_tx),
            exited,
            command: cmdline,
        })
    }

    /// Background task: owns `child`, waits for it to exit, fails pending calls.
    async fn wait_for_exit(
        mut child: Child,
        kill_rx: oneshot::Receiver<()>,
        tracker: Arc<RequestTracker>,
        exited: Arc<AtomicBool>,
    ) {
        tokio::select! {
            result = child.wait() => match result {
                Ok(status) => info!("Service process exited with status: {:?}", status),
                Err(e) => error!("Error waiting for service process: {}", e),
            },
            _ = kill_rx => {
                info!("Killing service process");
                if let Err(e) = child.kill().await {
                    error!("Failed to kill service process: {}", e);
                }
            }
        }

        // Flag first so calls registered after the drain see it
        exited.store(true, Ordering::Release);
        tracker.cancel_all().await;
    }

    /// Route response lines to the request tracker
    async fn stdout_reader(stdout: tokio::process::ChildStdout, tracker: Arc<RequestTracker>) {
        let mut reader = BufReader::new(stdout).lines();

        while let Ok(Some(line)) = reader.next_line().await {
            trace!("stdout: {}", line);
            match parse_response(&line) {
                Some(response) => {
                    if !tracker.handle_response(response.id, response.outcome).await {
                        warn!("Response for unknown request #{}", response.id);
                    }
                }
                None => debug!("service: {}", line),
            }
        }

        debug!("stdout reader finished");
    }

    /// Forward stderr lines to the log
    async fn stderr_reader(stderr: tokio::process::ChildStderr) {
        let mut reader = BufReader::new(stderr).lines();

        while let Ok(Some(line)) = reader.next_line().await {
            debug!("service stderr: {}", line);
        }

        debug!("stderr reader finished");
    }

    /// Write request lines to stdin
    async fn stdin_writer(mut stdin: tokio::process::ChildStdin, mut rx: mpsc::Receiver<String>) {
        while let Some(line) = rx.recv().await {
            trace!("stdin: {}", line);

            if let Err(e) = stdin.write_all(line.as_bytes()).await {
                error!("Failed to write to service stdin: {}", e);
                break;
            }
            if let Err(e) = stdin.write_all(b"\n").await {
                error!("Failed to write newline: {}", e);
                break;
            }
            if let Err(e) = stdin.flush().await {
                error!("Failed to flush service stdin: {}", e);
                break;
            }
        }

        debug!("stdin writer finished");
    }

    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::Acquire)
    }
}

impl Drop for ServiceProcess {
    fn drop(&mut self) {
        if let Some(kill_tx) = self.kill_tx.take() {
            if !self.has_exited() {
                debug!("Stopping service process (PID: {:?})", self.pid);
            }
            let _ = kill_tx.send(());
        }
    }
}

#[async_trait]
impl ServiceProxy for ServiceProcess {
    async fn interface(&self) -> Result<ServiceInterface> {
        match self.call(INTERFACE_METHOD, Vec::new()).await? {
            Reply::Single(Value::String(text)) => parse_interface(&text),
            Reply::Many(values) => match values.as_slice() {
                [Value::String(text)] => parse_interface(text),
                _ => Err(Error::interface(
                    "service returned no interface description",
                )),
            },
            Reply::Single(_) => Err(Error::interface(
                "interface description must be a string",
            )),
        }
    }

    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Reply> {
        let (id, response_rx) = self.tracker.register(method).await;

        if self.has_exited() {
            self.tracker.remove(id).await;
            return Err(Error::ServiceExited);
        }

        debug!("Sending request #{}: {}", id, method);
        if self.stdin_tx.send(build_request(id, method, &args)).await.is_err() {
            self.tracker.remove(id).await;
            return Err(if self.has_exited() {
                Error::ServiceExited
            } else {
                Error::channel_send("service stdin")
            });
        }

        response_rx.await.map_err(|_| Error::ChannelClosed)?
    }

    fn describe(&self) -> String {
        self.command.clone()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn cmd(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    async fn wait_until_exited(process: &ServiceProcess) {
        for _ in 0..100 {
            if process.has_exited() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("process did not exit");
    }

    #[tokio::test]
    async fn test_spawn_missing_program_fails() {
        let err = ServiceProcess::spawn(&cmd(&["callpane-no-such-program"]))
            .err()
            .unwrap();
        assert!(matches!(err, Error::ProcessSpawn { .. }));
    }

    #[tokio::test]
    async fn test_empty_command_fails() {
        assert!(ServiceProcess::spawn(&[]).is_err());
    }

    #[tokio::test]
    async fn test_echoed_request_reads_as_empty_reply() {
        // `cat` echoes the request line, which carries our id and no result
        let process = ServiceProcess::spawn(&cmd(&["cat"])).unwrap();
        let reply = process.call("add", vec![json!(2), json!(3)]).await.unwrap();
        assert_eq!(reply, Reply::empty());
        assert_eq!(process.describe(), "cat");
    }

    #[tokio::test]
    async fn test_call_after_exit_fails() {
        let process = ServiceProcess::spawn(&cmd(&["true"])).unwrap();
        wait_until_exited(&process).await;

        let err = process.call("add", vec![]).await.unwrap_err();
        assert!(matches!(err, Error::ServiceExited));
    }

    #[tokio::test]
    async fn test_pending_call_fails_when_process_exits() {
        // Reads one request, then exits without answering
        let process = ServiceProcess::spawn(&cmd(&["sh", "-c", "read line"])).unwrap();
        let err = process.call("hang", vec![]).await.unwrap_err();
        assert!(matches!(err, Error::ServiceExited | Error::ChannelSend { .. }));
    }
}
