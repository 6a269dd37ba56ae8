/*!
 * Tests for the failover orchestrator using mock strategies
 */

use std::time::Duration;

use romanize::errors::TransliterationError;
use romanize::transliteration::{Deadline, NO_PROVIDER, RomanizationStrategy, Transliterator};
use crate::common::heuristic_detector;
use crate::common::mock_strategies::{MockBehavior, MockStrategy, ascii_fold};

fn engine(strategies: Vec<Box<dyn RomanizationStrategy>>, max_chunk_chars: usize) -> Transliterator {
    Transliterator::new(heuristic_detector(), strategies, max_chunk_chars)
}

/// Three lines that cannot share a chunk of 4 chars
const THREE_CHUNKS: &str = "один\nдва\nтри";

#[tokio::test]
async fn test_romanize_withFirstStrategySucceeding_shouldNotCallLaterOnes() {
    let first = MockStrategy::new("first", MockBehavior::Map(ascii_fold));
    let second = MockStrategy::new("second", MockBehavior::Fixed("unused".to_string()));
    let (first_log, second_log) = (first.log(), second.log());

    let result = engine(vec![first.boxed(), second.boxed()], 450).romanize("Привет").await;

    assert_eq!(result.provider, "first");
    assert_eq!(result.result, "xxxxxx");
    assert_eq!(first_log.count(), 1);
    assert_eq!(second_log.count(), 0);
}

#[tokio::test]
async fn test_romanize_withFailingStrategies_shouldFollowPriorityOrder() {
    let failing = MockStrategy::new("failing", MockBehavior::Fail);
    let unavailable = MockStrategy::new("unavailable", MockBehavior::Unavailable);
    let working = MockStrategy::new("working", MockBehavior::Map(ascii_fold));
    let logs = [failing.log(), unavailable.log(), working.log()];

    let result = engine(vec![failing.boxed(), unavailable.boxed(), working.boxed()], 450)
        .romanize("Привет")
        .await;

    assert_eq!(result.provider, "working");
    assert_eq!(result.lang.as_deref(), Some("ru"));
    for log in &logs {
        assert_eq!(log.count(), 1);
    }
}

#[tokio::test]
async fn test_romanize_withDisabledStrategy_shouldNeverCallIt() {
    let disabled = MockStrategy::disabled("disabled");
    let working = MockStrategy::new("working", MockBehavior::Map(ascii_fold));
    let disabled_log = disabled.log();

    let result = engine(vec![disabled.boxed(), working.boxed()], 450).romanize("안녕").await;

    assert_eq!(result.provider, "working");
    assert_eq!(disabled_log.count(), 0);
}

#[tokio::test]
async fn test_romanize_withMidwayChunkFailure_shouldAbandonStrategyAndKeepNothing() {
    let flaky = MockStrategy::new("flaky", MockBehavior::FailAfter(1, |_| "partial".to_string()));
    let fallback = MockStrategy::new("fallback", MockBehavior::Map(ascii_fold));
    let (flaky_log, fallback_log) = (flaky.log(), fallback.log());

    let result = engine(vec![flaky.boxed(), fallback.boxed()], 4).romanize(THREE_CHUNKS).await;

    // the second chunk fails, the third is never offered
    assert_eq!(flaky_log.count(), 2);
    assert_eq!(fallback_log.chunks(), vec!["один", "два", "три"]);
    assert_eq!(result.provider, "fallback");
    assert!(!result.result.contains("partial"));
    assert_eq!(result.result, "xxxx\nxxx\nxxx");
}

#[tokio::test]
async fn test_romanize_withFirstChunkFailure_shouldStopImmediately() {
    let failing = MockStrategy::new("failing", MockBehavior::Fail);
    let log = failing.log();

    let result = engine(vec![failing.boxed()], 4).romanize(THREE_CHUNKS).await;

    assert_eq!(log.count(), 1);
    assert_eq!(result.provider, NO_PROVIDER);
    assert_eq!(result.result, THREE_CHUNKS);
}

#[tokio::test]
async fn test_romanize_withUnchangedOutput_shouldRejectAndMoveOn() {
    let echo = MockStrategy::new("echo", MockBehavior::Echo);
    let non_latin = MockStrategy::new("non_latin", MockBehavior::Fixed("12345".to_string()));
    let working = MockStrategy::new("working", MockBehavior::Map(ascii_fold));

    let result = engine(vec![echo.boxed(), non_latin.boxed(), working.boxed()], 450)
        .romanize("שלום")
        .await;

    assert_eq!(result.provider, "working");
    assert_eq!(result.lang.as_deref(), Some("he"));
}

#[tokio::test(start_paused = true)]
async fn test_romanize_withStalledStrategy_shouldTimeOutAndFallBack() {
    let stalled = MockStrategy::new("stalled", MockBehavior::Stall).with_timeout(Duration::from_millis(50));
    let working = MockStrategy::new("working", MockBehavior::Map(ascii_fold));

    let result = engine(vec![stalled.boxed(), working.boxed()], 450).romanize("Γειά σου").await;

    assert_eq!(result.provider, "working");
    assert_eq!(result.lang.as_deref(), Some("el"));
}

#[tokio::test]
async fn test_romanize_withAsciiChunk_shouldNotOfferItToStrategies() {
    let working = MockStrategy::new("working", MockBehavior::Map(ascii_fold));
    let log = working.log();

    let result = engine(vec![working.boxed()], 6).romanize("Hello\nПривет").await;

    assert_eq!(log.chunks(), vec!["Привет"]);
    assert_eq!(result.result, "Hello\nxxxxxx");
}

#[tokio::test]
async fn test_romanize_withBlankLineAtChunkEdge_shouldKeepStanzaBreak() {
    // the provider ends every answer with a newline of its own
    let padded = MockStrategy::new("padded", MockBehavior::Map(|c| format!("{}\n", ascii_fold(c))));
    let log = padded.log();
    let lyrics = "Привет\n\nПривет";

    let result = engine(vec![padded.boxed()], 7).romanize(lyrics).await;

    assert_eq!(log.chunks(), vec!["Привет", "Привет"]);
    assert_eq!(result.provider, "padded");
    assert_eq!(result.result, "xxxxxx\n\nxxxxxx");
    assert_eq!(result.result.split('\n').count(), lyrics.split('\n').count());
}

#[tokio::test]
async fn test_romanize_withEdgeNewlinesAndTrimmingProvider_shouldRestoreThem() {
    let trimming = MockStrategy::new("trimming", MockBehavior::Map(|c| ascii_fold(c.trim())));
    let log = trimming.log();

    let result = engine(vec![trimming.boxed()], 450).romanize("\n사랑해\n").await;

    assert_eq!(log.chunks(), vec!["사랑해"]);
    assert_eq!(result.result, "\nxxx\n");
}

#[tokio::test(start_paused = true)]
async fn test_romanize_by_withCallerDeadline_shouldCapStrategyBudget() {
    let stalled = MockStrategy::new("stalled", MockBehavior::Stall).with_timeout(Duration::from_secs(600));
    let later = MockStrategy::new("later", MockBehavior::Map(ascii_fold));
    let (stalled_log, later_log) = (stalled.log(), later.log());
    let engine = engine(vec![stalled.boxed(), later.boxed()], 450);

    let started = tokio::time::Instant::now();
    let result = engine.romanize_by("Γειά σου", Deadline::after(Duration::from_millis(100))).await;

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(stalled_log.count(), 1);
    assert_eq!(later_log.count(), 0);
    assert_eq!(result.provider, NO_PROVIDER);
    assert_eq!(result.result, "Γειά σου");
    assert_eq!(result.lang.as_deref(), Some("el"));
}

#[tokio::test]
async fn test_transliterate_by_withoutText_shouldReturnMissingInput() {
    let result = engine(vec![], 450)
        .transliterate_by(None, Deadline::after(Duration::from_secs(1)))
        .await;

    assert_eq!(result, Err(TransliterationError::MissingInput));
}

#[tokio::test]
async fn test_romanize_withEveryStrategyFailing_shouldReturnIdentity() {
    let strategies = vec![
        MockStrategy::new("a", MockBehavior::Fail).boxed(),
        MockStrategy::new("b", MockBehavior::Unavailable).boxed(),
        MockStrategy::new("c", MockBehavior::Echo).boxed(),
    ];

    let result = engine(strategies, 450).romanize("Я тебя люблю").await;

    assert_eq!(result.provider, NO_PROVIDER);
    assert_eq!(result.result, result.original);
    assert_eq!(result.lang.as_deref(), Some("ru"));
}

#[tokio::test]
async fn test_romanize_withEmptyOrBlankInput_shouldSkipEverything() {
    let working = MockStrategy::new("working", MockBehavior::Map(ascii_fold));
    let log = working.log();
    let engine = engine(vec![working.boxed()], 450);

    for input in ["", "  \n\t "] {
        let result = engine.romanize(input).await;
        assert_eq!(result.result, input);
        assert_eq!(result.provider, NO_PROVIDER);
        assert!(result.lang.is_none());
    }
    assert_eq!(log.count(), 0);
}

#[tokio::test]
async fn test_romanize_withAsciiInput_shouldSkipEverything() {
    let working = MockStrategy::new("working", MockBehavior::Fixed("changed".to_string()));
    let log = working.log();

    let result = engine(vec![working.boxed()], 450).romanize("Hello world, it's me!").await;

    assert_eq!(result.result, "Hello world, it's me!");
    assert_eq!(result.provider, NO_PROVIDER);
    assert!(result.lang.is_none());
    assert_eq!(log.count(), 0);
}

#[tokio::test]
async fn test_transliterate_withoutText_shouldReturnMissingInput() {
    let working = MockStrategy::new("working", MockBehavior::Map(ascii_fold));
    let log = working.log();

    let result = engine(vec![working.boxed()], 450).transliterate(None).await;

    assert_eq!(result, Err(TransliterationError::MissingInput));
    assert_eq!(log.count(), 0);
}

#[tokio::test]
async fn test_romanize_withPassingChunks_shouldPassWholeTextValidation() {
    let lyrics = "夜に駆ける\n沈むように溶けてゆくように\n二人だけの空が広がる夜に";
    for max_chunk_chars in [1, 5, 12, 450] {
        let working = MockStrategy::new("working", MockBehavior::Map(ascii_fold));
        let result = engine(vec![working.boxed()], max_chunk_chars).romanize(lyrics).await;
        assert_eq!(result.provider, "working", "max_chunk_chars = {}", max_chunk_chars);
    }
}

#[tokio::test]
async fn test_romanize_onItsOwnOutput_shouldNotClaimImprovement() {
    let working = MockStrategy::new("working", MockBehavior::Map(ascii_fold));
    let engine = engine(vec![working.boxed()], 450);

    let first = engine.romanize("Ελπίδα").await;
    let second = engine.romanize(&first.result).await;

    assert_eq!(first.provider, "working");
    assert_eq!(second.provider, NO_PROVIDER);
    assert_eq!(second.result, first.result);
}
