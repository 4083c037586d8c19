//! Data source adapter: one read of the task collection per view session.
//!
//! Failures are a single kind (network error or a body that is not a JSON
//! array of tasks). They are logged at this boundary and the session
//! continues with an empty collection.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::task::Task;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/todos";

/// Something that can produce the whole task collection in one read.
pub trait TaskSource {
    fn fetch_all(&self) -> Result<Vec<Task>>;

    /// Short description used in log lines.
    fn describe(&self) -> String;
}

impl<T: TaskSource + ?Sized> TaskSource for Box<T> {
    fn fetch_all(&self) -> Result<Vec<Task>> {
        (**self).fetch_all()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Unauthenticated `GET` of a JSON array of tasks.
#[derive(Debug, Clone)]
pub struct HttpTaskSource {
    endpoint: String,
}

impl HttpTaskSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpTaskSource {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl TaskSource for HttpTaskSource {
    fn fetch_all(&self) -> Result<Vec<Task>> {
        debug!(endpoint = %self.endpoint, "fetching task collection");
        let response = ureq::get(&self.endpoint).call()?;
        let body = response
            .into_string()
            .map_err(|err| Error::Fetch(format!("failed to read response body: {err}")))?;
        parse_tasks(&body)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Reads the same JSON array from a local file.
#[derive(Debug, Clone)]
pub struct FileTaskSource {
    path: PathBuf,
}

impl FileTaskSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskSource for FileTaskSource {
    fn fetch_all(&self) -> Result<Vec<Task>> {
        let body = std::fs::read_to_string(&self.path)?;
        parse_tasks(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Decode a response body into tasks.
pub fn parse_tasks(body: &str) -> Result<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(body)?;
    Ok(tasks)
}

/// Fetch once; on failure log the error and return an empty collection.
pub fn load_or_empty(source: &dyn TaskSource) -> Vec<Task> {
    match source.fetch_all() {
        Ok(tasks) => {
            info!(source = %source.describe(), count = tasks.len(), "loaded tasks");
            tasks
        }
        Err(err) => {
            error!(source = %source.describe(), error = %err, "error fetching tasks");
            Vec::new()
        }
    }
}

/// Run the fetch on a one-shot thread and deliver the collection on a channel.
///
/// Dropping the receiver abandons the result; the send error is ignored and
/// the thread still finishes normally. Dropping the handle detaches it.
pub fn spawn_fetch<S>(source: S) -> (Receiver<Vec<Task>>, JoinHandle<()>)
where
    S: TaskSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        let tasks = load_or_empty(&source);
        if tx.send(tasks).is_err() {
            debug!("view session ended before fetch completed");
        }
    });
    (rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Duration;

    struct FixedSource(Result<Vec<Task>>);

    impl TaskSource for FixedSource {
        fn fetch_all(&self) -> Result<Vec<Task>> {
            match &self.0 {
                Ok(tasks) => Ok(tasks.clone()),
                Err(err) => Err(Error::Fetch(err.to_string())),
            }
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    fn serve_once(status: &str, content_type: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/todos")
    }

    #[test]
    fn parse_tasks_reads_json_array() {
        let body = r#"[
            {"userId": 1, "id": 1, "title": "delectus aut autem", "completed": false},
            {"userId": 1, "id": 2, "title": "quis ut nam facilis", "completed": true}
        ]"#;
        let tasks = parse_tasks(body).expect("parse");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1], Task::new(2, "quis ut nam facilis", true, 1));
    }

    #[test]
    fn parse_tasks_rejects_non_json() {
        let err = parse_tasks("<html>oops</html>").unwrap_err();
        assert!(err.is_fetch_failure());
        assert!(parse_tasks(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn load_or_empty_swallows_failures() {
        let failing = FixedSource(Err(Error::Fetch("offline".to_string())));
        assert!(load_or_empty(&failing).is_empty());

        let ok = FixedSource(Ok(vec![Task::new(1, "a", false, 1)]));
        assert_eq!(load_or_empty(&ok).len(), 1);
    }

    #[test]
    fn http_source_fetches_collection() {
        let url = serve_once(
            "200 OK",
            "application/json",
            r#"[{"userId": 2, "id": 7, "title": "seven", "completed": false}]"#,
        );
        let tasks = HttpTaskSource::new(url).fetch_all().expect("fetch");
        assert_eq!(tasks, vec![Task::new(7, "seven", false, 2)]);
    }

    #[test]
    fn http_source_reports_server_errors_and_bad_bodies() {
        let url = serve_once("500 Internal Server Error", "text/plain", "boom");
        let err = HttpTaskSource::new(url).fetch_all().unwrap_err();
        assert!(err.is_fetch_failure());

        let url = serve_once("200 OK", "text/html", "<p>not json</p>");
        let err = HttpTaskSource::new(url).fetch_all().unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn spawn_fetch_delivers_once() {
        let (rx, handle) = spawn_fetch(FixedSource(Ok(vec![
            Task::new(1, "a", false, 1),
            Task::new(2, "b", true, 1),
        ])));
        let tasks = rx.recv_timeout(Duration::from_secs(5)).expect("delivered");
        assert_eq!(tasks.len(), 2);
        assert!(handle.join().is_ok());
        assert!(matches!(rx.try_recv(), Err(mpsc::TryRecvError::Disconnected)));
    }

    #[test]
    fn spawn_fetch_tolerates_dropped_receiver() {
        let (rx, handle) = spawn_fetch(FixedSource(Ok(vec![Task::new(1, "a", false, 1)])));
        drop(rx);
        assert!(handle.join().is_ok());
    }

    #[test]
    fn file_source_reads_fixture() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("todos.json");
        std::fs::write(
            &path,
            r#"[{"userId": 1, "id": 3, "title": "fugiat", "completed": true}]"#,
        )
        .expect("write");
        let tasks = FileTaskSource::new(&path).fetch_all().expect("read");
        assert_eq!(tasks[0].id, 3);

        let missing = FileTaskSource::new(dir.path().join("missing.json"));
        assert!(load_or_empty(&missing).is_empty());
    }
}
