use wordbeats::{
    engine::{AudioEngine, OfflineEngine, StepClock},
    playback::{PlayRequest, Player},
    sequencing::Scale,
    settings::{Tempo, VoiceSelection},
    voices::Instrument,
};

const SAMPLE_RATE: u32 = 48_000;

fn render(text: &str, voices: &VoiceSelection, steps: usize) -> Vec<f32> {
    let mut player = Player::new(OfflineEngine::new(SAMPLE_RATE));
    player
        .play(PlayRequest {
            text,
            scale: Scale::Minor,
            tempo: Tempo::DEFAULT,
            voices,
            record: false,
        })
        .unwrap();

    let sps = StepClock::compute_samples_per_step(Tempo::DEFAULT.bpm() as f64, SAMPLE_RATE as f64);
    let out = player.engine_mut().render((sps * steps as f64) as usize);
    player.stop();
    out
}

#[test]
fn every_instrument_renders_bounded_sound() {
    for instrument in Instrument::ALL {
        let out = render("aeiou", &VoiceSelection::single(instrument), 4);
        assert!(
            out.iter().any(|s| s.abs() > 1e-4),
            "{instrument} rendered silence"
        );
        assert!(
            out.iter().all(|s| s.is_finite() && s.abs() <= 1.0),
            "{instrument} left [-1, 1]"
        );
    }
}

#[test]
fn all_voices_at_once_stay_bounded() {
    let voices = VoiceSelection::new(Instrument::ALL).unwrap();
    let out = render("every voice together", &voices, 32);
    assert!(out.iter().all(|s| s.abs() <= 1.0));
}

#[test]
fn renders_are_reproducible() {
    let voices = VoiceSelection::new([Instrument::Drums, Instrument::Hihat, Instrument::Bass]).unwrap();
    let first = render("same words", &voices, 16);
    let second = render("same words", &voices, 16);
    assert_eq!(first, second);
}

#[test]
fn rests_only_text_is_silent() {
    // 'c' (99) and 's' (115) are odd consonants
    let out = render("cs", &VoiceSelection::single(Instrument::Piano), 8);
    assert!(out.iter().all(|&s| s == 0.0));
}

#[test]
fn engine_reports_sample_rate() {
    let engine = OfflineEngine::new(SAMPLE_RATE);
    assert_eq!(engine.sample_rate(), SAMPLE_RATE);
    assert!(!engine.is_started());
}
