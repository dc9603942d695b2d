use crate::utils::*;
use clap::Args;
use lightsout_core as game;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Lit,
    Unlit,
}

/// One running game plus what only the view cares about.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub engine: game::PlayEngine,
    pub hint: Option<game::Coord2>,
}

impl GameSession {
    fn new(engine: game::PlayEngine) -> Self {
        Self { engine, hint: None }
    }

    fn generate(config: game::GameConfig, policy: game::LayoutPolicy, seed: u64) -> Self {
        let generator = game::RandomLayoutGenerator::new(seed, policy);
        let engine = match game::PlayEngine::generate(generator, config) {
            Ok(engine) => engine,
            Err(err) => {
                log::error!("Could not generate board for {:?}: {}", config, err);
                game::PlayEngine::new(game::LightGrid::default())
            }
        };
        Self::new(engine)
    }

    fn cell_state_at(&self, coords: game::Coord2) -> ViewCellState {
        if self.engine.is_lit(coords) {
            ViewCellState::Lit
        } else {
            ViewCellState::Unlit
        }
    }

    fn is_hinted(&self, coords: game::Coord2) -> bool {
        self.hint == Some(coords)
    }

    /// Forwards one activation to the engine, returns whether anything changed.
    fn flip(&mut self, coords: game::Coord2) -> bool {
        match self.engine.flip(coords) {
            Ok(outcome) => {
                self.hint = None;
                if outcome.is_won() {
                    log::info!("Won in {} moves", self.engine.move_count());
                }
                true
            }
            Err(err) => {
                log::warn!("flip at {:?} rejected: {}", coords, err);
                false
            }
        }
    }

    fn show_hint(&mut self) -> bool {
        let hint = self.engine.hint();
        if hint.is_none() && !self.engine.is_finished() {
            log::info!("No sequence of presses clears this board");
        }
        let updated = self.hint != hint;
        self.hint = hint;
        updated
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Flip(game::Coord2),
    Hint,
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    cell_state: ViewCellState,
    #[prop_or_default]
    hinted: bool,
    callback: Callback<game::Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use ViewCellState::*;

    let CellProps {
        row,
        col,
        cell_state,
        hinted,
        callback,
    } = props.clone();

    let class = classes!(
        "cell",
        match cell_state {
            Lit => "lit",
            Unlit => "unlit",
        },
        hinted.then_some("hint"),
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("({}, {}) click", row, col);
        callback.emit((row, col));
    });

    html! {
        <td {class} {onclick}/>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Number of rows on the board
    #[arg(long, default_value_t = 3)]
    rows: game::Coord,

    /// Number of columns on the board
    #[arg(long, default_value_t = 3)]
    cols: game::Coord,

    /// Chance that a cell starts lit
    #[arg(long, default_value_t = 0.5)]
    chance: f64,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Only generate boards that can be cleared
    #[arg(long)]
    solvable: bool,
}

impl GameProps {
    fn config(&self) -> game::GameConfig {
        game::GameConfig::new((self.rows, self.cols), self.chance).unwrap_or_else(|err| {
            log::error!("{}, falling back to the default board", err);
            game::GameConfig::default()
        })
    }

    fn policy(&self) -> game::LayoutPolicy {
        if self.solvable {
            game::LayoutPolicy::Solvable
        } else {
            game::LayoutPolicy::Random
        }
    }
}

#[derive(Debug)]
pub(crate) struct BoardView {
    config: game::GameConfig,
    policy: game::LayoutPolicy,
    seed: u64,
    session: GameSession,
}

impl BoardView {
    fn restart(&mut self) {
        self.seed = js_random_seed();
        log::debug!("new game, seed: {}", self.seed);
        self.session = GameSession::generate(self.config, self.policy, self.seed);
    }
}

impl Component for BoardView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let config = props.config();
        let policy = props.policy();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        Self {
            config,
            policy,
            seed,
            session: GameSession::generate(config, policy, seed),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(coords) => {
                log::debug!("flip cell: {:?}", coords);
                self.session.flip(coords)
            }
            Hint => self.session.show_hint(),
            NewGame => {
                self.restart();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let engine = &self.session.engine;
        let is_finished = engine.is_finished();
        let moves = format_for_counter(engine.move_count());

        let cb_new_game = ctx.link().callback(|_: MouseEvent| NewGame);
        let cb_hint = ctx.link().callback(|_: MouseEvent| Hint);

        let board = if is_finished {
            html! {
                <div class="board-win">{"You won!"}</div>
            }
        } else {
            let (rows, cols) = engine.size();
            let callback = ctx.link().callback(Flip);
            html! {
                <table class="board">
                    <tbody>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let pos = (row, col);
                                        let cell_state = self.session.cell_state_at(pos);
                                        let hinted = self.session.is_hinted(pos);
                                        let callback = callback.clone();
                                        html! {
                                            <CellView {row} {col} {cell_state} {hinted} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                    </tbody>
                </table>
            }
        };

        html! {
            <div class="lights-out">
                <h2>{"Lights Out!"}</h2>
                <nav>
                    <aside>{moves}</aside>
                    <button onclick={cb_new_game}>{"New game"}</button>
                    <button onclick={cb_hint} disabled={is_finished}>{"Hint"}</button>
                </nav>
                {board}
            </div>
        }
    }
}
