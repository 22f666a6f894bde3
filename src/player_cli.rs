use std::io::{self, BufRead, Write};
use std::string::String;
use std::vec::Vec;

use crate::{
    ai,
    bitboard::CellSet,
    common::{PlayerId, RuleError},
    config::BOARD_SIZE,
    coord::{Coord, Orientation},
    firing::SalvoOrder,
    movement::{MoveOrder, MoveResolution},
    rng::SeededRng,
    state::{GameState, PlayerState, ShotResult},
};

use crate::player::Player;

/// Human at the terminal. Coordinates are typed as a column letter and a
/// row number, e.g. `C7`.
pub struct CliPlayer;

impl CliPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn coord_to_string(c: Coord) -> String {
    let col = (b'A' + c.x as u8) as char;
    std::format!("{}{}", col, c.y + 1)
}

pub fn parse_coord(input: &str) -> Option<Coord> {
    if input.len() < 2 {
        return None;
    }
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let x = (col_ch as u8 - b'A') as i32;
    let row_str: String = chars.collect();
    let row: i32 = row_str.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some(Coord::new(x, row - 1))
}

fn parse_orientation(input: Option<&str>, default: Orientation) -> Orientation {
    match input.and_then(|s| s.chars().next()) {
        Some('v') | Some('V') => Orientation::Vertical,
        Some('h') | Some('H') => Orientation::Horizontal,
        _ => default,
    }
}

/// Read one trimmed line; `None` on end of input.
fn prompt(text: &str) -> Option<String> {
    std::print!("{}", text);
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn print_header() {
    std::print!("   ");
    for x in 0..BOARD_SIZE {
        std::print!(" {}", (b'A' + x as u8) as char);
    }
    std::println!();
}

/// Own fleet: `S` intact segment, `X` damaged segment, `#` wreck.
fn print_fleet(player: &PlayerState) {
    print_header();
    for y in 0..BOARD_SIZE as i32 {
        std::print!("{:2} ", y + 1);
        for x in 0..BOARD_SIZE as i32 {
            let cell = Coord::new(x, y);
            let ch = player
                .fleet()
                .iter()
                .filter(|s| s.is_placed())
                .find_map(|s| {
                    s.segment_at(cell).map(|seg| {
                        if s.is_sunk() {
                            '#'
                        } else if s.is_segment_damaged(seg) {
                            'X'
                        } else {
                            'S'
                        }
                    })
                })
                .unwrap_or('.');
            std::print!(" {}", ch);
        }
        std::println!();
    }
}

fn print_target_board(hits: &CellSet, misses: &CellSet) {
    print_header();
    for y in 0..BOARD_SIZE as i32 {
        std::print!("{:2} ", y + 1);
        for x in 0..BOARD_SIZE as i32 {
            let cell = Coord::new(x, y);
            let ch = if hits.contains(cell) {
                'X'
            } else if misses.contains(cell) {
                'o'
            } else {
                '.'
            };
            std::print!(" {}", ch);
        }
        std::println!();
    }
}

/// Display the targeting board (top) and the player's fleet (bottom).
pub fn print_player_view(state: &GameState, player: PlayerId) {
    let me = state.player(player);
    std::println!("Round {} - opponent waters:", state.round());
    print_target_board(me.ephemeral_hits(), me.misses());
    std::println!("\nYour fleet:");
    print_fleet(me);
}

fn print_results(who: &str, results: &[ShotResult]) {
    for r in results {
        let outcome = match (r.hit, r.sunk_ship) {
            (_, Some(uid)) => std::format!("hit, {} sunk", uid),
            (true, None) => String::from("hit"),
            (false, None) => String::from("miss"),
        };
        let target = if r.target.in_bounds() {
            coord_to_string(r.target)
        } else {
            String::from("off board")
        };
        std::println!("{} {} -> {}", who, target, outcome);
    }
}

impl Player for CliPlayer {
    fn place_fleet(
        &mut self,
        rng: &mut SeededRng,
        state: &mut GameState,
        me: PlayerId,
    ) -> Result<(), RuleError> {
        std::println!("Place your ships (e.g. A5 H). Press enter for random placement.");
        let pending: Vec<_> = state
            .player(me)
            .fleet()
            .iter()
            .filter(|s| !s.is_placed())
            .map(|s| (s.uid(), s.template()))
            .collect();
        for (uid, template) in pending {
            loop {
                print_fleet(state.player(me));
                let text = std::format!("Place {} (length {}): ", template.name(), template.size());
                let line = prompt(&text).unwrap_or_default();
                if line.is_empty() {
                    let (anchor, orientation) = state
                        .random_placement(me, uid, rng)
                        .ok_or(RuleError::UnableToPlaceShip(uid))?;
                    state.place_ship(me, uid, anchor, orientation)?;
                    break;
                }
                let mut parts = line.split_whitespace();
                match parts.next().and_then(parse_coord) {
                    Some(anchor) => {
                        let orientation = parse_orientation(parts.next(), Orientation::Horizontal);
                        match state.place_ship(me, uid, anchor, orientation) {
                            Ok(()) => break,
                            Err(e) => std::println!("Error: {}", e),
                        }
                    }
                    None => std::println!("Invalid input"),
                }
            }
        }
        Ok(())
    }

    fn choose_salvo(&mut self, rng: &mut SeededRng, state: &GameState, me: PlayerId) -> SalvoOrder {
        print_player_view(state, me);
        let ships = state.unfired_ships(me);
        let suggestion = ai::plan_salvo(state, me, rng);
        for (i, uid) in ships.iter().enumerate() {
            if let Some(ship) = state.ship(*uid) {
                std::println!(
                    "  {}: {} at {} ({} guns)",
                    i + 1,
                    ship.template().name(),
                    coord_to_string(ship.anchor()),
                    ship.template().guns()
                );
            }
        }
        loop {
            let hint = suggestion
                .map(|s| coord_to_string(s.target))
                .unwrap_or_default();
            let text = std::format!("Fire <ship#> <target> [H|V] [{}]: ", hint);
            let Some(line) = prompt(&text).filter(|l| !l.is_empty()) else {
                if let Some(order) = suggestion {
                    return order;
                }
                continue;
            };
            let mut parts = line.split_whitespace();
            let ship = parts
                .next()
                .and_then(|p| p.parse::<usize>().ok())
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| ships.get(i).copied());
            let target = parts.next().and_then(parse_coord);
            match (ship, target) {
                (Some(ship), Some(target)) => {
                    return SalvoOrder {
                        ship,
                        target,
                        orientation: parse_orientation(parts.next(), Orientation::Horizontal),
                    }
                }
                _ => std::println!("Invalid input"),
            }
        }
    }

    fn plan_movement(
        &mut self,
        _rng: &mut SeededRng,
        state: &GameState,
        me: PlayerId,
    ) -> Vec<MoveOrder> {
        print_player_view(state, me);
        let mut orders = Vec::new();
        for ship in state.player(me).live_ships() {
            loop {
                let text = std::format!(
                    "Move {} from {} (range {}) [<anchor> H|V, enter to hold]: ",
                    ship.template().name(),
                    coord_to_string(ship.anchor()),
                    ship.template().move_range()
                );
                let line = prompt(&text).unwrap_or_default();
                if line.is_empty() {
                    orders.push(MoveOrder::hold(ship));
                    break;
                }
                let mut parts = line.split_whitespace();
                let Some(anchor) = parts.next().and_then(parse_coord) else {
                    std::println!("Invalid input");
                    continue;
                };
                let orientation = parse_orientation(parts.next(), ship.orientation());
                let order = MoveOrder::new(ship.uid(), anchor, orientation);
                if state.can_move_ship(me, &order) {
                    orders.push(order);
                    break;
                }
                std::println!("{} cannot reach {}", ship.template().name(), coord_to_string(anchor));
            }
        }
        orders
    }

    fn handle_salvo_result(&mut self, results: &[ShotResult]) {
        print_results("You fired at", results);
    }

    fn handle_opponent_salvo(&mut self, results: &[ShotResult]) {
        print_results("Opponent fired at", results);
    }

    fn handle_movement(&mut self, resolution: &MoveResolution) {
        for uid in &resolution.rejected {
            std::println!("{} could not complete its move", uid);
        }
    }

    fn handle_rejection(&mut self, error: RuleError) {
        std::println!("Refused: {}", error);
    }
}
