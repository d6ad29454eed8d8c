//! Yari Dojo entry point
//!
//! Handles platform-specific initialization and wires the quiz and throwing
//! phases to the DOM.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement};

    use yari_dojo::audio::{AudioManager, MusicTrack, SoundCue};
    use yari_dojo::consts::*;
    use yari_dojo::quiz::{AnswerOutcome, QuizSession};
    use yari_dojo::renderer::CanvasRenderer;
    use yari_dojo::settings::Settings;
    use yari_dojo::sim::{GameEvent, GamePhase, GameSession, tick};

    /// Game instance holding all state
    struct Game {
        quiz: QuizSession,
        /// Throwing phase, populated once the quiz completes
        session: Option<GameSession>,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        /// Pending requestAnimationFrame registration, if any.
        /// There is never more than one.
        raf_id: Option<i32>,
        /// AudioContext resumed after the first user gesture
        audio_unlocked: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_sfx_volume(settings.effective_sfx());
            audio.set_music_volume(settings.effective_music());
            Self {
                quiz: QuizSession::new(seed),
                session: None,
                renderer: None,
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                raf_id: None,
                audio_unlocked: false,
            }
        }

        /// Run simulation ticks through the fixed-timestep accumulator
        fn update(&mut self, dt: f32) -> Vec<GameEvent> {
            let Some(session) = self.session.as_mut() else {
                return Vec::new();
            };

            self.accumulator += dt;
            let mut events = Vec::new();
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                events.extend(tick(session, SIM_DT));
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            // Drop backlog after a long hitch instead of replaying it
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }
            events
        }

        /// Render the current frame
        fn render(&self) {
            let (Some(renderer), Some(session)) = (&self.renderer, &self.session) else {
                return;
            };
            renderer.clear();
            renderer.draw_target(&session.target);
            renderer.draw_launcher(&session.launcher);
            for projectile in &session.projectiles {
                renderer.draw_projectile(projectile);
            }
        }

        /// Resume the AudioContext on the first gesture
        fn unlock_audio(&mut self) {
            if !self.audio_unlocked {
                self.audio.resume();
                self.audio_unlocked = true;
            }
        }
    }

    // === Frame loop lifecycle ===
    //
    // Exactly one rAF registration exists while the loop runs; stop() cancels
    // the pending one, and reset always stops before touching state.

    fn schedule_frame(game: &Rc<RefCell<Game>>) {
        let g = game.clone();
        let closure = Closure::once(move |time: f64| on_frame(g, time));
        let Some(window) = web_sys::window() else {
            return;
        };
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().raf_id = Some(id),
            Err(_) => log::error!("requestAnimationFrame failed"),
        }
        closure.forget();
    }

    /// Attach to the frame source. Idempotent: a second start is a no-op.
    fn loop_start(game: &Rc<RefCell<Game>>) {
        if game.borrow().raf_id.is_some() {
            return;
        }
        {
            let mut g = game.borrow_mut();
            g.last_time = 0.0;
            g.accumulator = 0.0;
        }
        schedule_frame(game);
    }

    /// Detach from the frame source, cancelling the pending registration
    fn loop_stop(game: &Rc<RefCell<Game>>) {
        let id = game.borrow_mut().raf_id.take();
        if let Some(id) = id {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }

    fn on_frame(game: Rc<RefCell<Game>>, time: f64) {
        let events = {
            let mut g = game.borrow_mut();
            g.raf_id = None; // this registration has fired

            let dt = if g.last_time > 0.0 {
                (((time - g.last_time) / 1000.0) as f32).min(0.1)
            } else {
                SIM_DT
            };
            g.last_time = time;

            let events = g.update(dt);
            g.render();
            events
        };

        if !events.is_empty() {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                handle_events(&game, &document, &events);
            }
        }

        // Keep exactly one registration alive while the phase runs
        let running = game
            .borrow()
            .session
            .as_ref()
            .is_some_and(|s| s.phase == GamePhase::Running);
        if running {
            schedule_frame(&game);
        }
    }

    // === Event and input handling ===

    fn handle_events(game: &Rc<RefCell<Game>>, document: &Document, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Hit { score } => {
                    let g = game.borrow();
                    g.audio.play(SoundCue::Hit);
                    set_text(document, "score", &score.to_string());
                    if !g.settings.reduced_motion {
                        flash_hit_popup(document);
                    }
                }
                GameEvent::Ended { score } => {
                    {
                        let mut g = game.borrow_mut();
                        g.audio.stop_music();
                        g.audio.play(SoundCue::GameOver);
                    }
                    set_text(document, "final-score", &score.to_string());
                    set_hidden(document, "final-score-overlay", false);
                    log::info!("Game over, final score {score}");
                }
            }
        }
    }

    fn handle_submit(game: &Rc<RefCell<Game>>, document: &Document) {
        let Some(input) = element_as::<HtmlInputElement>(document, "quiz-answer") else {
            return;
        };
        let raw = input.value();

        let result = {
            let mut g = game.borrow_mut();
            g.unlock_audio();
            g.quiz.submit_answer(&raw)
        };

        input.set_value("");
        let _ = input.focus();

        // Empty or non-numeric input: leave the question up and re-prompt
        let Some(result) = result else {
            return;
        };

        {
            let g = game.borrow();
            match result.outcome {
                AnswerOutcome::Correct => g.audio.play(SoundCue::Correct),
                _ => g.audio.play(SoundCue::Incorrect),
            }
        }
        show_attempt_banner(document, result.outcome);

        if result.session_complete {
            start_throwing_phase(game, document);
        } else {
            let g = game.borrow();
            set_text(document, "quiz-question", &g.quiz.current_question().prompt());
        }
    }

    fn handle_fire(game: &Rc<RefCell<Game>>, document: &Document) {
        let ammo_left = {
            let mut g = game.borrow_mut();
            g.unlock_audio();
            match g.session.as_mut() {
                Some(session) => session.fire().map(|_| session.ammo),
                None => None,
            }
        };
        // A rejected throw (no ammo) changes nothing, not even the display
        if let Some(ammo) = ammo_left {
            set_text(document, "spear-count", &ammo.to_string());
        }
    }

    /// Hand the quiz result over and start the simulation loop
    fn start_throwing_phase(game: &Rc<RefCell<Game>>, document: &Document) {
        let ammo = {
            let mut g = game.borrow_mut();
            let ammo = g.quiz.ammunition();
            g.session = Some(GameSession::new(ammo));
            g.audio.start_music(MusicTrack::Game);
            ammo
        };

        set_hidden(document, "quiz-container", true);
        set_hidden(document, "game-container", false);
        set_hidden(document, "game-info-bar", false);
        set_text(document, "score", "0");
        set_text(document, "spear-count", &ammo.to_string());

        if let Some(renderer) = &game.borrow().renderer {
            renderer.resize();
        }

        log::info!("Quiz complete: {ammo} spears earned");
        loop_start(game);
    }

    /// Back to a fresh quiz; cancels any pending tick first
    fn reset_game(game: &Rc<RefCell<Game>>, document: &Document) {
        loop_stop(game);

        {
            let mut g = game.borrow_mut();
            let seed = js_sys::Date::now() as u64;
            g.quiz = QuizSession::new(seed);
            g.session = None;
            g.accumulator = 0.0;
            g.last_time = 0.0;
            g.audio.start_music(MusicTrack::Quiz);
            log::info!("Game reset, quiz reseeded with {seed}");
        }

        set_text(document, "score", "0");
        set_text(document, "spear-count", "0");
        set_hidden(document, "final-score-overlay", true);
        set_hidden(document, "game-container", true);
        set_hidden(document, "game-info-bar", true);
        set_hidden(document, "quiz-container", false);
        show_attempt_banner(document, AnswerOutcome::Correct);

        let g = game.borrow();
        set_text(document, "quiz-question", &g.quiz.current_question().prompt());
        drop(g);
        if let Some(input) = element_as::<HtmlInputElement>(document, "quiz-answer") {
            let _ = input.focus();
        }
    }

    // === DOM helpers ===

    fn element_as<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let result = if hidden {
                el.class_list().add_1("hidden")
            } else {
                el.class_list().remove_1("hidden")
            };
            if result.is_err() {
                log::warn!("class toggle failed for #{id}");
            }
        }
    }

    /// Second-chance and last-chance banners track the attempt budget
    fn show_attempt_banner(document: &Document, outcome: AnswerOutcome) {
        set_hidden(
            document,
            "second-chance-message",
            outcome != AnswerOutcome::IncorrectRetry,
        );
        set_hidden(
            document,
            "last-chance-message",
            outcome != AnswerOutcome::IncorrectFinal,
        );
    }

    /// Transient hit popup, hidden again after a beat
    fn flash_hit_popup(document: &Document) {
        set_hidden(document, "popup-container", false);
        let document = document.clone();
        let closure = Closure::once(move || set_hidden(&document, "popup-container", true));
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                800,
            );
        }
        closure.forget();
    }

    // === Input wiring ===

    fn setup_quiz_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("quiz-submit") {
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handle_submit(&game, &document);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(input) = document.get_element_by_id("quiz-answer") {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.key() == "Enter" {
                    handle_submit(&game, &document);
                }
            });
            let _ =
                input.add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_canvas_handler(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(canvas) = document.get_element_by_id("game-canvas") {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handle_fire(&game, &document);
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_retry_handler(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("retry-button") {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                reset_game(&game, &document);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(renderer) = &game.borrow().renderer {
                renderer.resize();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Yari Dojo starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Quiz session seeded with {seed}");

        // Canvas renderer for the throwing phase; the game degrades to
        // HUD-only if the canvas is missing
        match element_as::<HtmlCanvasElement>(&document, "game-canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))
            .and_then(CanvasRenderer::new)
        {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => log::warn!("Canvas renderer unavailable: {e:?}"),
        }

        setup_quiz_handlers(&document, game.clone());
        setup_canvas_handler(&document, game.clone());
        setup_retry_handler(&document, game.clone());
        setup_resize_handler(game.clone());

        game.borrow_mut().audio.start_music(MusicTrack::Quiz);
        set_text(
            &document,
            "quiz-question",
            &game.borrow().quiz.current_question().prompt(),
        );
        if let Some(input) = element_as::<HtmlInputElement>(&document, "quiz-answer") {
            let _ = input.focus();
        }

        log::info!("Yari Dojo running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Yari Dojo (native) starting...");
    log::info!("Native mode has no UI - running a seeded headless demo");

    headless_demo(42);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Auto-answer a seeded quiz, then throw every spear at the moving target
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(seed: u64) {
    use yari_dojo::consts::SIM_DT;
    use yari_dojo::quiz::QuizSession;
    use yari_dojo::sim::{GameEvent, GamePhase, GameSession, tick};

    let mut quiz = QuizSession::new(seed);
    loop {
        let answer = quiz.current_question().answer.to_string();
        match quiz.submit_answer(&answer) {
            Some(result) if result.session_complete => break,
            Some(_) => {}
            None => break,
        }
    }
    log::info!("Quiz complete: {} spears earned", quiz.ammunition());

    let mut session = GameSession::new(quiz.ammunition());
    let mut ticks = 0u64;
    while session.phase == GamePhase::Running {
        // Throw one spear every half second
        if ticks % 30 == 0 {
            let _ = session.fire();
        }
        for event in tick(&mut session, SIM_DT) {
            if let GameEvent::Ended { score } = event {
                println!("Final score: {score}");
            }
        }
        ticks += 1;
    }
    log::info!("Simulation ended after {ticks} ticks, score {}", session.score);
}
