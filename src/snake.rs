use tracing::{debug, info};

use crate::pickup::Pickup;
use crate::{BoardInt, Coords};
use Direction::*;
use LifeState::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    pub fn offset(self) -> (BoardInt, BoardInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Right => (1, 0),
            Left => (-1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LifeState {
    Alive,
    Dead,
}

/// One body cell. Neighbors are indices into the owning snake's arena.
struct Segment {
    pos: Coords,
    ahead: Option<usize>,
    behind: Option<usize>,
}

pub struct Snake {
    segments: Vec<Segment>,
    head: usize,
    tail: usize,
    board_size: BoardInt,
    direction: Direction,
    just_ate: bool,
    state: LifeState,
}

pub fn wrap(v: BoardInt, board_size: BoardInt) -> BoardInt {
    v.rem_euclid(board_size)
}

impl Snake {
    pub fn new(pos: Coords, board_size: BoardInt) -> Self {
        let pos = (wrap(pos.0, board_size), wrap(pos.1, board_size));
        let head = Segment { pos, ahead: None, behind: None };

        Snake {
            segments: vec![head],
            head: 0,
            tail: 0,
            board_size,
            direction: Right,
            just_ate: false,
            state: Alive,
        }
    }

    pub fn set_direction(&mut self, new_direction: Direction) {
        // Reversing is allowed, running into your own neck is part of the game
        if self.state == Alive {
            self.direction = new_direction;
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn head(&self) -> Coords {
        self.segments[self.head].pos
    }

    pub fn tail(&self) -> Coords {
        self.segments[self.tail].pos
    }

    pub fn is_dead(&self) -> bool {
        self.state == Dead
    }

    /// Ends the game without a collision, e.g. when the player quits.
    pub fn kill(&mut self) {
        self.state = Dead;
    }

    /// Positions from head to tail.
    pub fn segments(&self) -> Segments<'_> {
        Segments { snake: self, next: Some(self.head) }
    }

    pub fn count_segments(&self) -> usize {
        self.segments().count()
    }

    /// Advances the snake one cell. Returns true if it is dead afterwards.
    pub fn step(&mut self, pickup: &mut Pickup) -> bool {
        if self.state == Dead {
            return true;
        }

        let (dx, dy) = self.direction.offset();
        let (hx, hy) = self.head();
        let new_head = (wrap(hx + dx, self.board_size), wrap(hy + dy, self.board_size));

        // Walk tail to head, each segment taking the spot of the one ahead of it.
        // A tail added by the last meal stays put for one step.
        let mut cur = self.tail;
        while let Some(ahead) = self.segments[cur].ahead {
            if self.just_ate && cur == self.tail {
                self.just_ate = false;
            } else {
                self.segments[cur].pos = self.segments[ahead].pos;
            }
            cur = ahead;
        }

        self.segments[self.head].pos = new_head;

        if self.check_death() {
            self.state = Dead;
            info!(length = self.count_segments(), x = new_head.0, y = new_head.1, "snake ran into itself");
            return true;
        }

        self.check_for_food(pickup);
        false
    }

    pub fn check_death(&self) -> bool {
        let head = self.head();
        self.segments().skip(1).any(|pos| pos == head)
    }

    /// Grows the snake when its tail reaches the pickup.
    pub fn check_for_food(&mut self, pickup: &mut Pickup) {
        if self.tail() != pickup.pos() {
            return;
        }

        let new_tail = self.segments.len();
        self.segments.push(Segment { pos: pickup.pos(), ahead: Some(self.tail), behind: None });
        self.segments[self.tail].behind = Some(new_tail);
        self.tail = new_tail;
        self.just_ate = true;

        debug!(length = self.segments.len(), "snake ate");
        pickup.relocate();
    }
}

pub struct Segments<'a> {
    snake: &'a Snake,
    next: Option<usize>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Coords;

    fn next(&mut self) -> Option<Self::Item> {
        let seg = &self.snake.segments[self.next?];
        self.next = seg.behind;
        Some(seg.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: BoardInt = 10;

    fn far_pickup() -> Pickup {
        // Row 0 is never visited by the snakes below
        Pickup::at((0, 0), N, 1)
    }

    fn body(snake: &Snake) -> Vec<Coords> {
        snake.segments().collect()
    }

    /// Snake heading right with its head at (4 + len, 5), body trailing left.
    fn snake_of_length(len: usize) -> Snake {
        let mut snake = Snake::new((5, 5), N);
        while snake.count_segments() < len {
            let mut pickup = Pickup::at(snake.tail(), N, 1);
            snake.check_for_food(&mut pickup);
            assert!(!snake.step(&mut far_pickup()));
        }
        snake
    }

    #[test]
    fn new_snake_is_single_segment() {
        let snake = Snake::new((5, 5), N);
        assert_eq!(snake.head(), snake.tail());
        assert_eq!(snake.count_segments(), 1);
        assert_eq!(snake.direction(), Right);
        assert!(!snake.is_dead());
    }

    #[test]
    fn construction_wraps_position() {
        let snake = Snake::new((-1, 12), N);
        assert_eq!(snake.head(), (9, 2));
    }

    #[test]
    fn wraps_around_every_edge() {
        let cases = [
            ((9, 5), Right, (0, 5)),
            ((0, 5), Left, (9, 5)),
            ((5, 0), Up, (5, 9)),
            ((5, 9), Down, (5, 0)),
        ];

        for (start, dir, expected) in cases.iter().copied() {
            let mut snake = Snake::new(start, N);
            snake.set_direction(dir);
            assert!(!snake.step(&mut far_pickup()));
            assert_eq!(snake.head(), expected, "{:?} from {:?}", dir, start);
        }
    }

    #[test]
    fn single_step_moves_right() {
        let mut snake = Snake::new((5, 5), N);
        assert!(!snake.step(&mut far_pickup()));
        assert_eq!(body(&snake), vec![(6, 5)]);
    }

    #[test]
    fn plain_step_shifts_every_segment() {
        let mut snake = snake_of_length(4);
        let before = body(&snake);
        assert_eq!(before, vec![(8, 5), (7, 5), (6, 5), (5, 5)]);

        assert!(!snake.step(&mut far_pickup()));
        assert_eq!(body(&snake), vec![(9, 5), (8, 5), (7, 5), (6, 5)]);

        snake.set_direction(Down);
        assert!(!snake.step(&mut far_pickup()));
        assert_eq!(body(&snake), vec![(9, 6), (9, 5), (8, 5), (7, 5)]);
    }

    #[test]
    fn eating_appends_tail_at_pickup() {
        let mut snake = snake_of_length(2);
        let mut pickup = Pickup::at(snake.tail(), N, 3);
        let eaten_at = pickup.pos();

        snake.check_for_food(&mut pickup);

        assert_eq!(snake.count_segments(), 3);
        assert_eq!(snake.tail(), eaten_at);
        let (x, y) = pickup.pos();
        assert!((0..N).contains(&x) && (0..N).contains(&y));
    }

    #[test]
    fn grown_tail_waits_one_step() {
        let mut snake = snake_of_length(2);
        snake.check_for_food(&mut Pickup::at(snake.tail(), N, 3));
        assert_eq!(body(&snake), vec![(6, 5), (5, 5), (5, 5)]);

        assert!(!snake.step(&mut far_pickup()));
        assert_eq!(body(&snake), vec![(7, 5), (6, 5), (5, 5)]);

        assert!(!snake.step(&mut far_pickup()));
        assert_eq!(body(&snake), vec![(8, 5), (7, 5), (6, 5)]);
    }

    #[test]
    fn food_is_matched_against_tail() {
        let mut snake = snake_of_length(3);
        let mut pickup = Pickup::at((9, 5), N, 5);

        // Head passes over the pickup without eating it
        for _ in 0..3 {
            assert!(!snake.step(&mut pickup));
            assert_eq!(snake.count_segments(), 3);
        }
        assert_eq!(body(&snake), vec![(0, 5), (9, 5), (8, 5)]);

        assert!(!snake.step(&mut pickup));
        assert_eq!(snake.count_segments(), 4);
        assert_eq!(snake.tail(), (9, 5));
    }

    #[test]
    fn single_segment_eats_where_it_lands() {
        let mut snake = Snake::new((5, 5), N);
        let mut pickup = Pickup::at((6, 5), N, 9);

        assert!(!snake.step(&mut pickup));
        assert_eq!(snake.head(), (6, 5));
        assert_eq!(snake.tail(), (6, 5));
        assert_eq!(snake.count_segments(), 2);

        // Both segments share a cell until the next step separates them
        assert!(!snake.step(&mut far_pickup()));
        assert_eq!(body(&snake), vec![(7, 5), (6, 5)]);
    }

    #[test]
    fn length_grows_by_one_per_meal() {
        let mut snake = Snake::new((5, 5), N);
        for k in 1..=5 {
            let mut pickup = Pickup::at(snake.tail(), N, k as u64);
            snake.check_for_food(&mut pickup);
            assert!(!snake.step(&mut far_pickup()));
            assert_eq!(snake.count_segments(), 1 + k);
        }
    }

    #[test]
    fn reversing_into_body_kills() {
        let mut snake = snake_of_length(3);
        assert_eq!(body(&snake), vec![(7, 5), (6, 5), (5, 5)]);

        snake.set_direction(Left);
        // The tail lands on (6, 5) too, a food check would grow the snake
        let mut pickup = Pickup::at((6, 5), N, 4);
        assert!(snake.step(&mut pickup));
        assert!(snake.is_dead());
        assert_eq!(snake.count_segments(), 3);
    }

    #[test]
    fn turning_into_body_kills() {
        let mut snake = snake_of_length(5);
        for dir in [Down, Left].iter().copied() {
            snake.set_direction(dir);
            assert!(!snake.step(&mut far_pickup()));
        }
        snake.set_direction(Up);
        assert!(snake.step(&mut far_pickup()));
        assert!(snake.is_dead());
    }

    #[test]
    fn two_segments_can_swap_ends() {
        let mut snake = snake_of_length(2);
        snake.set_direction(Left);
        assert!(!snake.step(&mut far_pickup()));
        assert_eq!(body(&snake), vec![(5, 5), (6, 5)]);
    }

    #[test]
    fn dead_snake_stays_put() {
        let mut snake = Snake::new((5, 5), N);
        snake.kill();
        snake.set_direction(Up);

        assert!(snake.step(&mut far_pickup()));
        assert_eq!(snake.head(), (5, 5));
        assert_eq!(snake.direction(), Right);
    }

    #[test]
    fn unit_board_eats_every_step() {
        let mut snake = Snake::new((0, 0), 1);
        let mut pickup = Pickup::new(1, Some(0));

        assert!(!snake.step(&mut pickup));
        assert_eq!(snake.count_segments(), 2);

        // Head and the grown tail now share the only cell
        assert!(snake.step(&mut pickup));
    }
}
