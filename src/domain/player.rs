// src/domain/player.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Один из двух слотов часов.
///
/// Часы хранятся по значению в `[Clock; 2]`, а активный игрок: это просто
/// индекс в этот массив, без ссылок друг на друга.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    /// Первый игрок (белые).
    One,
    /// Второй игрок (чёрные).
    Two,
}

impl PlayerSlot {
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// Соперник этого игрока.
    pub const fn opponent(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// Индекс в массиве часов (0 или 1).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    /// Внешний идентификатор игрока (1 или 2), тот, что уходит в снапшоты и DTO.
    #[inline]
    pub const fn id(self) -> u8 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PlayerSlot::One),
            2 => Some(PlayerSlot::Two),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.id())
    }
}
