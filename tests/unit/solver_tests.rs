/*!
 * Tests for the proof-of-work challenge solver
 */

use rand::Rng;

use lrcpress::challenge::{self, Challenge, SolveEvent, SolverConfig};

const EASY_TARGET: &str = "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

fn random_prefix() -> String {
    let mut rng = rand::rng();
    (0..16)
        .map(|_| rng.random_range(b'a'..=b'z') as char)
        .collect()
}

/// Liveness: with the maximum target the very first attempt wins
#[tokio::test]
async fn test_solve_withMaximumTarget_shouldFinishOnFirstAttempt() {
    let challenge = Challenge {
        prefix: random_prefix(),
        target: EASY_TARGET.to_string(),
    };
    let prefix = challenge.prefix.clone();

    let nonce = challenge::spawn(challenge, SolverConfig::default())
        .solve()
        .await
        .unwrap();

    assert_eq!(nonce, 0);
    assert!(challenge::verify_nonce(&prefix, nonce, EASY_TARGET).unwrap());
}

/// Liveness: a small expected attempt count terminates with a nonce whose
/// fingerprint satisfies the target
#[tokio::test]
async fn test_solve_withSmallDifficulty_shouldSatisfyTarget() {
    // 1 in 16 digests fall at or below this target on average
    let target = format!("0f{}", "ff".repeat(31));
    let challenge = Challenge {
        prefix: random_prefix(),
        target: target.clone(),
    };
    let prefix = challenge.prefix.clone();

    let nonce = challenge::spawn(challenge, SolverConfig::default())
        .solve()
        .await
        .unwrap();

    assert!(challenge::verify_nonce(&prefix, nonce, &target).unwrap());
}

/// The winning nonce combines with the prefix into the publish token
#[tokio::test]
async fn test_solve_winningNonce_shouldBuildToken() {
    let challenge = Challenge {
        prefix: "server-prefix".to_string(),
        target: EASY_TARGET.to_string(),
    };

    let nonce = challenge::spawn(challenge, SolverConfig::default())
        .solve()
        .await
        .unwrap();
    let token = challenge::build_token("server-prefix", nonce);

    assert_eq!(token, format!("server-prefix:{}", nonce));
    assert!(token.starts_with("server-prefix:"));
}

/// Exactly one terminal event is delivered and nothing follows it
#[tokio::test]
async fn test_events_terminalEvent_shouldBeLast() {
    let challenge = Challenge {
        prefix: random_prefix(),
        target: EASY_TARGET.to_string(),
    };
    let mut handle = challenge::spawn(challenge, SolverConfig::default());

    let mut terminals = 0;
    while let Some(event) = handle.recv().await {
        if matches!(event, SolveEvent::Solved { .. } | SolveEvent::Failed { .. }) {
            terminals += 1;
        }
    }

    assert_eq!(terminals, 1);
}

/// A cancelled search delivers no events to the caller
#[tokio::test]
async fn test_cancel_beforeSolution_shouldSilenceTheStream() {
    let impossible = "00".repeat(32);
    let mut handle = challenge::spawn(
        Challenge {
            prefix: random_prefix(),
            target: impossible,
        },
        SolverConfig {
            progress_interval: 1_000,
            max_attempts: None,
        },
    );

    handle.cancel();

    assert!(handle.recv().await.is_none());
}

/// The optional ceiling turns an endless search into a failure
#[tokio::test]
async fn test_solve_withCeiling_shouldReportExhaustion() {
    let impossible = "00".repeat(32);
    let result = challenge::spawn(
        Challenge {
            prefix: random_prefix(),
            target: impossible,
        },
        SolverConfig {
            progress_interval: 100,
            max_attempts: Some(500),
        },
    )
    .solve()
    .await;

    let err = result.unwrap_err().to_string();
    assert!(err.contains("500 attempts"));
}
