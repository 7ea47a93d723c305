use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Exit status for a run stopped with Ctrl-C.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Cancellation token for one command, wired to Ctrl-C.
///
/// The first Ctrl-C cancels the token so the running step can stop cleanly.
/// A second one exits at once. Once `ctrl_c` has been awaited the default
/// SIGINT behaviour is gone for the whole process, so every long step of the
/// command has to watch this token.
pub(crate) fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let on_interrupt = token.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        on_interrupt.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    });

    token
}

/// Runs `work` unless `token` is cancelled first. `None` means cancelled.
pub(crate) async fn until_cancelled<F: Future>(
    token: &CancellationToken,
    work: F,
) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        output = work => Some(output),
    }
}
