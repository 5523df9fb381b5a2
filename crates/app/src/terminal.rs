//! Line-oriented terminal front end.
//!
//! Reads commands from stdin, forwards them to the game driver and prints
//! whatever changed in the published snapshot.

use std::fmt::Write as _;
use std::io::Write as _;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use catemino_core::QuestionBank;
use catemino_core::model::{CategoryKey, Leaderboard, Phase, group_thousands};
use services::{DriverHandle, GameEvent, GameObserver, LeaderboardService, SessionSnapshot};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// `a`-`d` or `1`-`4`. An answer while asking, a category from the menu.
    Choice(usize),
    Category(CategoryKey),
    Lifeline,
    Menu,
    Ranking,
    Sound,
    Help,
    Quit,
}

impl FromStr for Input {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let line = raw.trim().to_lowercase();
        match line.as_str() {
            "a" | "1" => Ok(Self::Choice(0)),
            "b" | "2" => Ok(Self::Choice(1)),
            "c" | "3" => Ok(Self::Choice(2)),
            "d" | "4" => Ok(Self::Choice(3)),
            "50" | "50:50" | "comodin" | "comodín" => Ok(Self::Lifeline),
            "m" | "menu" | "menú" => Ok(Self::Menu),
            "r" | "ranking" => Ok(Self::Ranking),
            "s" | "sonido" => Ok(Self::Sound),
            "h" | "?" | "ayuda" => Ok(Self::Help),
            "q" | "salir" | "quit" => Ok(Self::Quit),
            other => other.parse::<CategoryKey>().map(Self::Category).map_err(|_| ()),
        }
    }
}

/// Shared on/off flag for the bell. Clones flip the same switch.
#[derive(Debug, Clone)]
pub struct SoundSwitch(Arc<AtomicBool>);

impl SoundSwitch {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Flips the switch and returns the new state.
    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::Relaxed)
    }
}

/// Rings the terminal bell for the game's sound cues while the switch is on.
#[derive(Debug)]
pub struct BellObserver {
    sound: SoundSwitch,
}

impl BellObserver {
    #[must_use]
    pub fn new(sound: SoundSwitch) -> Self {
        Self { sound }
    }
}

impl GameObserver for BellObserver {
    fn on_event(&self, event: &GameEvent) {
        if !self.sound.is_enabled() {
            return;
        }
        if let Some(cue) = event.sound_cue() {
            debug!(?cue, "sound cue");
            let mut out = std::io::stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}

/// What a line of input asks for, given the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    Help,
    Ranking,
    ToggleSound,
    ShowMenu,
    Abandon,
    Select(usize),
    Lifeline,
    Start(CategoryKey),
    Notice(&'static str),
}

fn route(input: Input, snap: &SessionSnapshot, bank: &QuestionBank) -> Action {
    let in_game = matches!(snap.phase, Phase::Asking | Phase::Resolving);
    match input {
        Input::Quit => Action::Quit,
        Input::Help => Action::Help,
        Input::Ranking => Action::Ranking,
        Input::Sound => Action::ToggleSound,
        Input::Menu if in_game => Action::Abandon,
        Input::Menu => Action::ShowMenu,
        Input::Choice(index) if snap.can_select(index) => Action::Select(index),
        Input::Choice(_) if snap.phase == Phase::Resolving => {
            Action::Notice("Espera: se está revelando la respuesta.")
        }
        Input::Choice(_) if in_game => Action::Notice("Esa opción no está disponible."),
        Input::Choice(index) => bank
            .categories()
            .get(index)
            .map_or(Action::Notice("No existe esa categoría."), |c| {
                Action::Start(c.key())
            }),
        Input::Lifeline if snap.can_use_lifeline() => Action::Lifeline,
        Input::Lifeline if in_game => Action::Notice("Ya usaste el comodín en esta partida."),
        Input::Lifeline => Action::Notice("El comodín solo se usa durante una pregunta."),
        Input::Category(_) if in_game => {
            Action::Notice("Termina la partida o vuelve al menú con `m` primero.")
        }
        Input::Category(key) => Action::Start(key),
    }
}

/// Interactive session over stdin/stdout.
pub struct Terminal {
    handle: DriverHandle,
    bank: Arc<QuestionBank>,
    leaderboard: LeaderboardService,
    sound: SoundSwitch,
}

impl Terminal {
    #[must_use]
    pub fn new(
        handle: DriverHandle,
        bank: Arc<QuestionBank>,
        leaderboard: LeaderboardService,
        sound: SoundSwitch,
    ) -> Self {
        Self {
            handle,
            bank,
            leaderboard,
            sound,
        }
    }

    /// Runs until the player quits or stdin closes.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if stdin cannot be read.
    pub async fn run(self, first_category: Option<CategoryKey>) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut snapshots = self.handle.snapshots();
        let mut last = snapshots.borrow_and_update().clone();

        print_out(&render_menu(&self.bank));
        if let Some(category) = first_category {
            self.start(category).await;
        }

        loop {
            // Render pending changes before reading the next line.
            tokio::select! {
                biased;
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let next = snapshots.borrow_and_update().clone();
                    if let Some(text) = render_transition(&last, &next) {
                        print_out(&text);
                    }
                    last = next;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if !self.handle_line(&line).await {
                        break;
                    }
                }
            }
        }

        self.handle.shutdown().await;
        Ok(())
    }

    // Returns false once the player asked to quit.
    async fn handle_line(&self, line: &str) -> bool {
        if line.trim().is_empty() {
            return true;
        }
        let Ok(input) = line.parse::<Input>() else {
            print_out("Comando no reconocido. Escribe `?` para ver la ayuda.");
            return true;
        };

        let snap = self.handle.snapshot();
        let sent = match route(input, &snap, &self.bank) {
            Action::Quit => return false,
            Action::Help => {
                print_out(HELP);
                Ok(())
            }
            Action::Ranking => {
                let board = self.leaderboard.load().await;
                print_out(&render_board(&board));
                Ok(())
            }
            Action::ToggleSound => {
                let on = self.sound.toggle();
                print_out(if on { "Sonido activado." } else { "Sonido desactivado." });
                Ok(())
            }
            Action::ShowMenu => {
                print_out(&render_menu(&self.bank));
                Ok(())
            }
            Action::Abandon => self.handle.abandon().await,
            Action::Select(index) => self.handle.select(index).await,
            Action::Lifeline => self.handle.use_lifeline().await,
            Action::Start(category) => {
                self.start(category).await;
                Ok(())
            }
            Action::Notice(text) => {
                print_out(text);
                Ok(())
            }
        };

        if let Err(err) = sent {
            warn!(error = %err, "intent not delivered");
            return false;
        }
        true
    }

    async fn start(&self, category: CategoryKey) {
        match self.handle.start(Some(category)).await {
            Ok(events) if events.is_empty() => {
                print_out("Ya hay una partida en curso. Vuelve al menú con `m` para cambiar de categoría.");
            }
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, %category, "could not start session");
                print_out(&format!("No se pudo iniciar la partida: {err}"));
            }
        }
    }
}

const HELP: &str = "\
Comandos:
  a-d / 1-4   responder (en el menú: elegir categoría)
  50          comodín 50:50 (una vez por partida)
  m           volver al menú
  r           ver ranking
  s           activar o silenciar el sonido
  q           salir";

fn print_out(text: &str) {
    println!("{text}");
}

/// Formats a prize with thousands separators.
#[must_use]
pub fn money(value: u64) -> String {
    format!("${}", group_thousands(value))
}

#[must_use]
pub fn render_menu(bank: &QuestionBank) -> String {
    let mut out = String::from("\n¿Quién quiere ser Catemino?\n\nElige una categoría:\n");
    for (i, category) in bank.categories().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} ({} preguntas)",
            i + 1,
            category.key().label(),
            category.len()
        );
    }
    out.push_str("\n`r` ranking, `?` ayuda, `q` salir");
    out
}

#[must_use]
pub fn render_question(snap: &SessionSnapshot) -> String {
    let Some(question) = snap.question.as_ref() else {
        return String::new();
    };
    let mut out = format!(
        "\nPregunta {} / {}  ·  Premio {}  ·  Puntaje {}\n{}\n",
        snap.question_number(),
        snap.total_questions,
        money(snap.current_prize),
        money(snap.score),
        question.text,
    );
    for (i, option) in question.options.iter().enumerate() {
        let label = OPTION_LABELS.get(i).copied().unwrap_or('?');
        if snap.is_hidden(i) {
            let _ = writeln!(out, "  {label}) ---");
        } else {
            let _ = writeln!(out, "  {label}) {option}");
        }
    }
    let lifeline = if snap.lifeline_available { "50:50 disponible" } else { "50:50 usado" };
    let _ = write!(out, "Tiempo: {}s  ·  {lifeline}", snap.time_remaining);
    out
}

/// Text to print when the snapshot moves from `prev` to `next`, if any.
#[must_use]
pub fn render_transition(prev: &SessionSnapshot, next: &SessionSnapshot) -> Option<String> {
    let new_question = prev.session != next.session
        || prev.current_question_index != next.current_question_index
        || prev.phase != Phase::Asking;

    match next.phase {
        Phase::Idle if prev.phase != Phase::Idle => Some("Partida abandonada.".to_owned()),
        Phase::Asking if new_question || prev.hidden_options != next.hidden_options => {
            Some(render_question(next))
        }
        Phase::Asking if prev.time_remaining != next.time_remaining => {
            let t = next.time_remaining;
            (t <= 5 || t % 5 == 0).then(|| format!("  {t}s"))
        }
        Phase::Resolving if prev.phase != Phase::Resolving => Some(render_reveal(next)),
        Phase::Finished if prev.phase != Phase::Finished => Some(render_result(next)),
        _ => None,
    }
}

fn render_reveal(snap: &SessionSnapshot) -> String {
    let label = |index: Option<usize>| {
        index
            .and_then(|i| OPTION_LABELS.get(i).copied())
            .unwrap_or('?')
    };
    let picked = label(snap.selected_option);
    let answer = label(snap.revealed_answer);
    if snap.selected_option == snap.revealed_answer {
        format!("Elegiste {picked}... ¡Correcto!")
    } else {
        format!("Elegiste {picked}... La respuesta era {answer}.")
    }
}

#[must_use]
pub fn render_result(snap: &SessionSnapshot) -> String {
    let Some(result) = snap.result() else {
        return String::new();
    };
    let rank = result.rank();
    let mut out = format!(
        "\n{}\n{}\nPuntaje final: {} PTS\nRango: {}\n",
        result.headline(),
        result.outcome.message(),
        group_thousands(result.score),
        rank.title(),
    );
    if let Some(next) = rank.next() {
        let _ = writeln!(
            out,
            "Te faltan {} PTS para {}.",
            group_thousands(next.threshold().saturating_sub(result.score)),
            next.label()
        );
    }
    let _ = write!(out, "\n{}\n\nElige otra categoría o `r` para el ranking.", result.share_text());
    out
}

#[must_use]
pub fn render_board(board: &Leaderboard) -> String {
    if board.is_empty() {
        return "Aún no hay puntajes. ¡Sé el primero!".to_owned();
    }
    let mut out = String::from("\nRanking local\n");
    for (i, entry) in board.entries().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<20} {:>12} PTS  {}",
            i + 1,
            entry.display_name,
            group_thousands(entry.score),
            entry.recorded_at.format("%d-%m-%Y"),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use catemino_core::model::{LeaderboardEntry, Outcome, QuestionId, SessionId};
    use catemino_core::time::fixed_now;
    use services::QuestionView;

    use super::*;

    fn asking() -> SessionSnapshot {
        SessionSnapshot {
            session: Some(SessionId::new(1)),
            phase: Phase::Asking,
            category: Some(CategoryKey::Rodeo),
            total_questions: 10,
            question: Some(QuestionView {
                id: QuestionId::new("r1"),
                text: "¿Cómo se llama el recinto?".into(),
                options: vec!["Estadio".into(), "Medialuna".into(), "Cancha".into(), "Plaza".into()],
            }),
            current_prize: 1_000,
            time_remaining: 15,
            lifeline_available: true,
            ..SessionSnapshot::idle()
        }
    }

    #[test]
    fn parses_answers_and_commands() {
        assert_eq!("B".parse::<Input>(), Ok(Input::Choice(1)));
        assert_eq!(" 4 ".parse::<Input>(), Ok(Input::Choice(3)));
        assert_eq!("50".parse::<Input>(), Ok(Input::Lifeline));
        assert_eq!("fútbol".parse::<Input>(), Ok(Input::Category(CategoryKey::Futbol)));
        assert_eq!("q".parse::<Input>(), Ok(Input::Quit));
        assert!("e".parse::<Input>().is_err());
    }

    #[test]
    fn answers_route_on_the_current_phase() {
        let bank = QuestionBank::builtin().unwrap();
        let snap = asking();
        assert_eq!(route(Input::Choice(0), &snap, &bank), Action::Select(0));
        assert_eq!(route(Input::Lifeline, &snap, &bank), Action::Lifeline);
        assert_eq!(route(Input::Menu, &snap, &bank), Action::Abandon);
        assert!(matches!(
            route(Input::Category(CategoryKey::Futbol), &snap, &bank),
            Action::Notice(_)
        ));

        let menu = SessionSnapshot::idle();
        let first = bank.categories()[0].key();
        assert_eq!(route(Input::Choice(0), &menu, &bank), Action::Start(first));
        assert_eq!(route(Input::Menu, &menu, &bank), Action::ShowMenu);
        assert!(matches!(route(Input::Lifeline, &menu, &bank), Action::Notice(_)));
    }

    #[test]
    fn unavailable_options_are_not_sent() {
        let bank = QuestionBank::builtin().unwrap();
        let mut snap = asking();
        snap.hidden_options = vec![0, 2];
        snap.lifeline_available = false;
        assert!(matches!(route(Input::Choice(0), &snap, &bank), Action::Notice(_)));
        assert_eq!(route(Input::Choice(1), &snap, &bank), Action::Select(1));
        assert!(matches!(route(Input::Lifeline, &snap, &bank), Action::Notice(_)));

        snap.phase = Phase::Resolving;
        assert!(matches!(route(Input::Choice(1), &snap, &bank), Action::Notice(_)));
    }

    #[test]
    fn sound_switch_is_shared_between_clones() {
        let sound = SoundSwitch::new(true);
        let bell = BellObserver::new(sound.clone());
        assert!(!sound.toggle());
        assert!(!bell.sound.is_enabled());
        assert!(sound.toggle());
        assert!(bell.sound.is_enabled());
        assert_eq!("s".parse::<Input>(), Ok(Input::Sound));
    }

    #[test]
    fn hidden_options_are_masked() {
        let mut snap = asking();
        snap.hidden_options = vec![0, 2];
        let text = render_question(&snap);
        assert!(text.contains("A) ---"));
        assert!(text.contains("B) Medialuna"));
        assert!(text.contains("C) ---"));
        assert!(text.contains("Premio $1.000"));
    }

    #[test]
    fn quiet_ticks_are_not_printed() {
        let prev = asking();
        let mut next = prev.clone();
        next.time_remaining = 14;
        assert_eq!(render_transition(&prev, &next), None);
        next.time_remaining = 10;
        assert_eq!(render_transition(&prev, &next).as_deref(), Some("  10s"));
    }

    #[test]
    fn finishing_prints_result_card() {
        let prev = asking();
        let mut next = prev.clone();
        next.phase = Phase::Finished;
        next.outcome = Some(Outcome::LostTimeout);
        next.score = 12_000;

        let text = render_transition(&prev, &next).unwrap();
        assert!(text.contains("Fin del Camino"));
        assert!(text.contains("12.000 PTS"));
        assert!(text.contains("Conocedor Local"));
    }

    #[test]
    fn board_lists_entries_in_order() {
        let mut board = Leaderboard::new();
        board.insert(LeaderboardEntry::new("Ana", 3_000, fixed_now()));
        board.insert(LeaderboardEntry::new("Luis", 15_000, fixed_now()));
        let text = render_board(&board);
        let luis = text.find("Luis").unwrap();
        let ana = text.find("Ana").unwrap();
        assert!(luis < ana);
        assert!(render_board(&Leaderboard::new()).contains("Aún no hay"));
    }
}
