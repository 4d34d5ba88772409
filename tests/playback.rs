use wordbeats::{
    engine::{AudioEngine, OfflineEngine, StepCallback, StepClock},
    error::{EngineError, PlaybackError},
    playback::{PlayRequest, Player, PlayerState},
    record::Recorder,
    sequencing::{pitch::*, Scale},
    settings::{Tempo, VoiceSelection},
    synth::NoteEvent,
    voices::Instrument,
};

/// Engine whose steps are fired by hand into a note log.
#[derive(Default)]
struct ScriptedEngine {
    started: bool,
    callback: Option<StepCallback>,
    steps: u64,
    events: Vec<NoteEvent>,
    recorder: Option<Recorder>,
    fault: Option<PlaybackError>,
}

impl ScriptedEngine {
    fn step(&mut self) {
        let Some(callback) = self.callback.as_mut() else {
            return;
        };
        if let Err(err) = callback(self.steps, &mut self.events) {
            self.fault.get_or_insert(err);
        }
        self.steps += 1;
    }
}

impl AudioEngine for ScriptedEngine {
    fn start(&mut self) -> Result<(), EngineError> {
        self.started = true;
        Ok(())
    }

    fn is_started(&self) -> bool {
        self.started
    }

    fn sample_rate(&self) -> u32 {
        48_000
    }

    fn schedule(&mut self, _tempo: Tempo, callback: StepCallback) -> Result<(), EngineError> {
        self.callback = Some(callback);
        self.steps = 0;
        Ok(())
    }

    fn cancel(&mut self) {
        self.callback = None;
        self.steps = 0;
    }

    fn steps_fired(&self) -> u64 {
        self.steps
    }

    fn attach_recorder(&mut self, recorder: Recorder) {
        self.recorder = Some(recorder);
    }

    fn detach_recorder(&mut self) -> Option<Recorder> {
        self.recorder.take()
    }

    fn take_fault(&mut self) -> Option<PlaybackError> {
        self.fault.take()
    }
}

fn request<'a>(text: &'a str, voices: &'a VoiceSelection) -> PlayRequest<'a> {
    PlayRequest {
        text,
        scale: Scale::Major,
        tempo: Tempo::DEFAULT,
        voices,
        record: false,
    }
}

#[test]
fn beats_trigger_every_selected_voice() {
    let voices = VoiceSelection::new([Instrument::Piano, Instrument::Bass]).unwrap();
    let mut player = Player::new(ScriptedEngine::default());
    player.play(request("hello", &voices)).unwrap();
    assert_eq!(player.state(), PlayerState::Playing);

    player.engine_mut().step();
    player.engine_mut().step();

    // The bass voice gets the same note; it transposes when it sounds.
    let events = &player.engine().events;
    assert_eq!(
        events.as_slice(),
        &[
            NoteEvent { instrument: Instrument::Piano, note: C4 },
            NoteEvent { instrument: Instrument::Bass, note: C4 },
            NoteEvent { instrument: Instrument::Piano, note: A4 },
            NoteEvent { instrument: Instrument::Bass, note: A4 },
        ]
    );
}

#[test]
fn rests_trigger_nothing_and_steps_wrap() {
    // c=99 rest, a vowel beat
    let voices = VoiceSelection::single(Instrument::Synth);
    let mut player = Player::new(ScriptedEngine::default());
    player.play(request("ca", &voices)).unwrap();

    for _ in 0..4 {
        player.engine_mut().step();
    }

    let events = &player.engine().events;
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.note == events[0].note));
    assert_eq!(player.current_step(), Some(1));
}

#[test]
fn no_note_fires_after_stop() {
    let voices = VoiceSelection::single(Instrument::Drums);
    let mut player = Player::new(ScriptedEngine::default());
    player.play(request("aeiou", &voices)).unwrap();
    player.engine_mut().step();
    player.engine_mut().step();
    assert_eq!(player.engine().events.len(), 2);

    player.stop();
    assert_eq!(player.state(), PlayerState::Idle);
    for _ in 0..10 {
        player.engine_mut().step();
    }
    assert_eq!(player.engine().events.len(), 2);
    assert!(player.session().is_none());
}

#[test]
fn stop_silences_the_offline_engine() {
    let voices = VoiceSelection::new([Instrument::Kick, Instrument::Strings]).unwrap();
    let mut player = Player::new(OfflineEngine::new(48_000));
    player.play(request("boom boom", &voices)).unwrap();

    let before = player.engine_mut().render(12_000);
    assert!(before.iter().any(|s| s.abs() > 1e-4));

    player.stop();
    let transport = player.engine().transport();
    assert_eq!(wordbeats::engine::lock(&transport).active_voices(), 0);
    drop(transport);

    let after = player.engine_mut().render(24_000);
    assert!(after.iter().all(|&s| s == 0.0));
    assert_eq!(player.engine().steps_fired(), 0);
}

#[test]
fn blank_text_plays_the_placeholder() {
    let voices = VoiceSelection::default();
    let mut player = Player::new(ScriptedEngine::default());
    let session = player.play(request(" \t ", &voices)).unwrap();
    assert_eq!(
        session.composition().text().as_str(),
        "loremipsumdolorsitamet"
    );
}

#[test]
fn refused_start_leaves_player_idle() {
    let voices = VoiceSelection::default();
    let mut player = Player::new(OfflineEngine::refusing(48_000, "denied"));
    let err = player.play(request("hello", &voices)).unwrap_err();

    assert!(matches!(err, EngineError::Initialization(_)));
    assert_eq!(player.state(), PlayerState::Idle);
    assert!(player.session().is_none());
}

#[test]
fn recording_starts_with_the_first_step() {
    let voices = VoiceSelection::single(Instrument::Piano);
    let mut player = Player::new(OfflineEngine::new(48_000));
    let mut req = request("hello", &voices);
    req.record = true;
    player.play(req).unwrap();

    let sps = StepClock::compute_samples_per_step(120.0, 48_000.0) as usize;
    let rendered = player.engine_mut().render(sps * 5);
    let recording = player.stop().unwrap();

    assert_eq!(recording.samples(), rendered.as_slice());
    assert!(recording.samples()[..64].iter().any(|s| s.abs() > 0.0));

    let bytes = recording.to_wav_bytes().unwrap();
    let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(reader.len() as usize, sps * 5);
}

#[test]
fn replaying_restarts_from_step_zero() {
    let voices = VoiceSelection::single(Instrument::Piano);
    let mut player = Player::new(ScriptedEngine::default());
    player.play(request("hello", &voices)).unwrap();
    player.engine_mut().step();
    player.engine_mut().step();
    player.engine_mut().step();

    player.play(request("hello", &voices)).unwrap();
    player.engine_mut().step();
    assert_eq!(player.engine().events.last().map(|e| e.note), Some(C4));
    assert_eq!(player.current_step(), Some(0));
}

#[test]
fn recording_can_start_and_finish_mid_session() {
    let voices = VoiceSelection::single(Instrument::Piano);
    let mut player = Player::new(OfflineEngine::new(48_000));
    assert!(!player.start_recording());

    player.play(request("hello", &voices)).unwrap();
    player.engine_mut().render(2_000);
    assert!(player.start_recording());
    assert!(!player.start_recording());

    let captured = player.engine_mut().render(5_000);
    let recording = player.finish_recording().unwrap();
    assert_eq!(recording.samples(), captured.as_slice());
    assert!(player.is_playing());
    assert!(player.stop().is_none());
}
