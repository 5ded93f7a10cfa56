use crate::api::QuizBackend;
use crate::logger;
use crate::quiz::{QuizRequest, QuizResponse};
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

/// Background thread performing the quiz network calls so the UI
/// loop never blocks. Requests carry the session generation and the
/// response echoes it back for the staleness check.
pub fn spawn_quiz_worker<B: QuizBackend + 'static>(
    backend: B,
    tx: Sender<QuizResponse>,
    rx: Receiver<QuizRequest>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("coursevault::quiz_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("Failed to start worker runtime: {}", e));
                    return;
                }
            };

            loop {
                match rx.recv() {
                    Ok(QuizRequest::Generate {
                        generation,
                        document_id,
                        num_questions,
                    }) => {
                        logger::log(&format!(
                            "Worker generating quiz for document {}",
                            document_id
                        ));
                        let result =
                            rt.block_on(backend.generate_quiz(&document_id, num_questions));
                        let _ = tx.send(QuizResponse::Questions { generation, result });
                    }
                    Ok(QuizRequest::Submit {
                        generation,
                        document_id,
                        answers,
                        time_taken_secs,
                    }) => {
                        logger::log(&format!(
                            "Worker submitting quiz for document {}",
                            document_id
                        ));
                        let result =
                            rt.block_on(backend.submit_quiz(&document_id, &answers, time_taken_secs));
                        let _ = tx.send(QuizResponse::Graded { generation, result });
                    }
                    Err(_) => {
                        // Channel disconnected, exit worker
                        logger::log("Worker channel disconnected, exiting");
                        break;
                    }
                }
            }
        })
        .expect("Failed to spawn quiz worker thread")
}
