//! Held-note scenarios and slide timing across blocks.

use monoslide::prelude::*;

use crate::helpers::*;

/// Run `blocks` empty blocks, collecting every bend emitted.
fn drain_bends(slide: &mut MonoSlide, output: &mut MidiOutputBuffer, blocks: usize) -> Vec<i32> {
    let empty = Input::new();
    let mut all = Vec::new();
    for _ in 0..blocks {
        let out = run_block(slide, TEST_BUFFER_SIZE, &empty, output);
        all.extend(bends(&out));
    }
    all
}

/// Two notes pressed together, then the lower one released mid-block.
#[test]
fn test_chord_then_release_base() {
    let mut slide = test_slide();
    let mut output = slide.output_buffer();
    let input = Input::new()
        .note_on(0, 60, 80)
        .note_on(0, 64, 40)
        .note_off(2000, 60);

    let out = run_block(&mut slide, 4000, &input, &mut output);

    // 64 is quieter and becomes the top; the note-on goes to 60 below it.
    // Four semitones is outside the default bend range, so holding 64 is silent.
    assert_eq!(
        out,
        vec![
            (0, Msg::Bend(0)),
            (0, Msg::NoteOn { key: 60, velocity: 80 })
        ]
    );
    assert_eq!(slide.state(), SlideState::Holding);
    assert_eq!(slide.sounding_key(), Some(60));
    assert_eq!(slide.held_keys().collect::<Vec<_>>(), vec![64]);

    // Releasing the last key turns off the sounding note
    let out = run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_off(100, 64),
        &mut output,
    );
    assert_eq!(out, vec![(100, Msg::NoteOff { key: 60 })]);
    assert_eq!(slide.state(), SlideState::Idle);
}

/// Same chord with a wide bend range: the release bends to the held key.
#[test]
fn test_chord_then_release_base_wide_range() {
    let mut slide = test_slide_with(|b| b.bend_semitone_distance(12.0));
    let mut output = slide.output_buffer();
    let input = Input::new()
        .note_on(0, 60, 80)
        .note_on(0, 64, 40)
        .note_off(2000, 60);

    let out = run_block(&mut slide, 4000, &input, &mut output);
    assert_eq!(
        out,
        vec![
            (0, Msg::Bend(0)),
            (0, Msg::NoteOn { key: 60, velocity: 80 }),
            (2000, Msg::Bend(2730)),
        ]
    );
}

/// Legato into a second key: one full up-and-back slide, then silence.
#[test]
fn test_full_slide_cycle() {
    // Duration: 24000 * 64 / 256 = 6000 samples each way
    let mut slide = test_slide_with(|b| b.beat_divisor(256.0));
    let mut output = slide.output_buffer();

    run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_on(0, 60, 100),
        &mut output,
    );
    let out = run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_on(0, 62, 64),
        &mut output,
    );
    assert_eq!(out.first(), Some(&(0, Msg::Bend(0))));
    assert!(!out.iter().any(|(_, msg)| matches!(msg, Msg::NoteOn { .. })));
    assert_eq!(slide.state(), SlideState::Sliding);

    let mut all = bends(&out);
    all.extend(drain_bends(&mut slide, &mut output, 30));

    // Forced bend plus periodic ticks at t = 0, 96, ..., 12000
    assert_eq!(all.len(), 127);
    let peak = all.iter().copied().max().unwrap();
    assert_eq!(peak, 8125);
    assert_eq!(*all.last().unwrap(), 0);

    let peak_at = all.iter().position(|&b| b == peak).unwrap();
    assert!(all[..=peak_at].windows(2).all(|w| w[0] <= w[1]));
    assert!(all[peak_at..].windows(2).all(|w| w[0] >= w[1]));
    assert!(all.iter().all(|&b| (0..=8191).contains(&b)));

    assert_eq!(slide.state(), SlideState::Holding);
    assert!(drain_bends(&mut slide, &mut output, 4).is_empty());
}

/// Releasing the top during a slide snaps back to the base key.
#[test]
fn test_release_top_mid_slide() {
    let mut slide = test_slide();
    let mut output = slide.output_buffer();
    run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_on(0, 60, 100).note_on(0, 61, 90),
        &mut output,
    );
    assert_eq!(slide.state(), SlideState::Sliding);

    let out = run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_off(300, 61),
        &mut output,
    );
    assert_eq!(out.first(), Some(&(300, Msg::Bend(0))));
    assert_eq!(bends(&out).len(), 1);
    assert_eq!(slide.state(), SlideState::Holding);
}

/// A third key slides from the previous top, not from the sounding key.
#[test]
fn test_third_note_slides_from_previous_top() {
    let mut slide = test_slide_with(|b| b.bend_semitone_distance(12.0));
    let mut output = slide.output_buffer();
    run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_on(0, 60, 100),
        &mut output,
    );
    run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_on(0, 64, 100),
        &mut output,
    );
    let out = run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_on(10, 67, 100),
        &mut output,
    );

    // Restart at t=0 from 64, four semitones above the sounding 60
    assert_eq!(out.first(), Some(&(10, Msg::Bend(2730))));
    assert_eq!(slide.held_keys().collect::<Vec<_>>(), vec![60, 64, 67]);
    assert_eq!(slide.sounding_key(), Some(60));
}

/// The quietest of several simultaneous presses becomes the top.
#[test]
fn test_simultaneous_presses_pick_quietest() {
    let mut slide = test_slide();
    let mut output = slide.output_buffer();
    let input = Input::new()
        .note_on(0, 1, 80)
        .note_on(0, 2, 40)
        .note_on(0, 3, 60);
    let out = run_block(&mut slide, TEST_BUFFER_SIZE, &input, &mut output);

    assert_eq!(slide.held_keys().collect::<Vec<_>>(), vec![1, 3, 2]);
    assert!(out.contains(&(0, Msg::NoteOn { key: 3, velocity: 60 })));
}

/// A release and a press at the same frame hand over cleanly.
#[test]
fn test_release_and_press_same_frame() {
    let mut slide = test_slide();
    let mut output = slide.output_buffer();
    run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_on(0, 60, 100),
        &mut output,
    );

    let input = Input::new().note_on(200, 72, 90).note_off(200, 60);
    let out = run_block(&mut slide, TEST_BUFFER_SIZE, &input, &mut output);
    assert_eq!(
        out,
        vec![
            (200, Msg::NoteOff { key: 60 }),
            (200, Msg::Bend(0)),
            (200, Msg::NoteOn { key: 72, velocity: 90 }),
        ]
    );
}

/// Note-on with velocity 0 releases the key.
#[test]
fn test_zero_velocity_note_on_releases() {
    let mut slide = test_slide();
    let mut output = slide.output_buffer();
    run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_on(0, 60, 100),
        &mut output,
    );
    let out = run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_on(64, 60, 0),
        &mut output,
    );
    assert_eq!(out, vec![(64, Msg::NoteOff { key: 60 })]);
}

/// A faster tempo shortens the slide.
#[test]
fn test_tempo_scales_slide_length() {
    let mut slide = test_slide_with(|b| b.beat_divisor(256.0));
    let mut output = slide.output_buffer();

    run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().tempo(0, 240.0).note_on(0, 60, 100),
        &mut output,
    );
    assert_eq!(slide.samples_per_beat(), 12000);

    let out = run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_on(0, 62, 64),
        &mut output,
    );
    let mut all = bends(&out);
    all.extend(drain_bends(&mut slide, &mut output, 20));

    // 3000 samples each way: forced bend plus ticks at t = 0 ..= 5952
    assert_eq!(all.len(), 64);
    assert_eq!(slide.state(), SlideState::Holding);
}

/// Invalid tempo updates leave the beat length alone.
#[test]
fn test_invalid_tempo_ignored() {
    init_tracing();
    let mut slide = test_slide();
    let mut output = slide.output_buffer();
    let input = Input::new()
        .tempo(0, 0.0)
        .tempo(10, -120.0)
        .tempo(20, f32::INFINITY);
    run_block(&mut slide, TEST_BUFFER_SIZE, &input, &mut output);
    assert_eq!(slide.samples_per_beat(), TEST_SAMPLES_PER_BEAT);
}

/// Forced velocity applies to every emitted note-on.
#[test]
fn test_forced_velocity() {
    let mut slide = test_slide_with(|b| b.forced_velocity(127.0));
    let mut output = slide.output_buffer();
    let out = run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_on(5, 60, 1),
        &mut output,
    );
    assert_eq!(out[1], (5, Msg::NoteOn { key: 60, velocity: 127 }));

    // Disabling it restores the played velocity
    slide.params().set_forced_velocity(0.0);
    let out = run_block(
        &mut slide,
        TEST_BUFFER_SIZE,
        &Input::new().note_off(0, 60).note_on(0, 61, 33),
        &mut output,
    );
    assert!(out.contains(&(0, Msg::NoteOn { key: 61, velocity: 33 })));
}
