use serde::{Deserialize, Serialize};

use crate::geohash::{
    constants::{LAT_BITS, LON_BITS},
    hash::GeoHash,
};

/// 隣接セルの方向を表すEnum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// 経度方向（X）と緯度方向（Y）の移動量 `(dx, dy)` を返す。
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }
}

/// あるセルを囲む8つの隣接セル。すべて元のセルと同じステップを持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Neighbors {
    pub north: GeoHash,
    pub south: GeoHash,
    pub east: GeoHash,
    pub west: GeoHash,
    pub north_east: GeoHash,
    pub north_west: GeoHash,
    pub south_east: GeoHash,
    pub south_west: GeoHash,
}

impl Neighbors {
    pub fn get(&self, direction: Direction) -> GeoHash {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
            Direction::NorthEast => self.north_east,
            Direction::NorthWest => self.north_west,
            Direction::SouthEast => self.south_east,
            Direction::SouthWest => self.south_west,
        }
    }

    /// [`Direction::ALL`] の順に `(方向, セル)` を返す。
    pub fn iter(&self) -> impl Iterator<Item = (Direction, GeoHash)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |direction| (direction, self.get(direction)))
    }
}

/// ビット平面 `plane` の値を1つ増減させる。
///
/// `plane` は対象平面のビットだけが立った値、`other` はもう一方の平面の
/// `step` 桁分のマスク。もう一方の平面の位置を1で埋めることで、
/// 桁上がり・桁借りがインターリーブされたビットを飛び越して伝播する。
fn shift_plane(plane: u64, other: u64, d: i8) -> u64 {
    if d > 0 {
        plane.wrapping_add(other.wrapping_add(1))
    } else {
        (plane | other).wrapping_sub(other.wrapping_add(1))
    }
}

impl GeoHash {
    /// 経度方向（奇数ビット）に `d` セル動かす。`d` は -1, 0, 1 のいずれか。
    fn move_x(self, d: i8) -> GeoHash {
        if d == 0 {
            return self;
        }
        let unused = 64 - 2 * self.step() as u32;
        let x = self.bits() & LON_BITS;
        let y = self.bits() & LAT_BITS;

        let x = shift_plane(x, LAT_BITS >> unused, d) & (LON_BITS >> unused);
        GeoHash::from_raw(x | y, self.step())
    }

    /// 緯度方向（偶数ビット）に `d` セル動かす。`d` は -1, 0, 1 のいずれか。
    fn move_y(self, d: i8) -> GeoHash {
        if d == 0 {
            return self;
        }
        let unused = 64 - 2 * self.step() as u32;
        let x = self.bits() & LON_BITS;
        let y = self.bits() & LAT_BITS;

        let y = shift_plane(y, LON_BITS >> unused, d) & (LAT_BITS >> unused);
        GeoHash::from_raw(x | y, self.step())
    }

    /// 指定した方向に隣接するセルを返します。
    ///
    /// 座標に復号することなく、インターリーブされたビット列上の加減算だけで求めます。
    ///
    /// グリッドの端では固定幅の整数として循環します。最も西の列の西隣は最も東の列に、
    /// 最も北の行の北隣は最も南の行になります。経度方向の循環は180度経線をまたぐ移動と
    /// 一致しますが、緯度方向の循環は地理的な意味を持たないため、呼び出し側で扱う必要があります。
    ///
    /// ```
    /// # use geohash_logic::{Direction, GeoHash};
    /// // step = 2 の (緯度1, 経度1) のセル
    /// let hash = GeoHash::new(0b0011, 2).unwrap();
    /// assert_eq!(hash.neighbor(Direction::East).bits(), 0b1001);
    /// assert_eq!(hash.neighbor(Direction::North).bits(), 0b0110);
    ///
    /// // 東端から東へ動くと西端に戻る
    /// let east_edge = GeoHash::new(0b1010, 2).unwrap();
    /// assert_eq!(east_edge.neighbor(Direction::East).bits(), 0);
    /// ```
    pub fn neighbor(&self, direction: Direction) -> GeoHash {
        let (dx, dy) = direction.offset();
        self.move_x(dx).move_y(dy)
    }

    /// 8つの隣接セルをまとめて返します。
    ///
    /// 各セルの循環の扱いは [`GeoHash::neighbor`] と同じです。
    /// 隣接セルのビット列が0（南西端のセル）になることもあり、その場合は復号できません。
    ///
    /// ```
    /// # use geohash_logic::GeoHash;
    /// let hash = GeoHash::new(0b0011, 2).unwrap();
    /// let neighbors = hash.neighbors();
    /// assert_eq!(neighbors.west.bits(), 0b0001);
    /// assert_eq!(neighbors.south.bits(), 0b0010);
    /// assert_eq!(neighbors.north_east.bits(), 0b1100);
    /// assert_eq!(neighbors.south_west.bits(), 0);
    /// ```
    pub fn neighbors(&self) -> Neighbors {
        Neighbors {
            north: self.neighbor(Direction::North),
            south: self.neighbor(Direction::South),
            east: self.neighbor(Direction::East),
            west: self.neighbor(Direction::West),
            north_east: self.neighbor(Direction::NorthEast),
            north_west: self.neighbor(Direction::NorthWest),
            south_east: self.neighbor(Direction::SouthEast),
            south_west: self.neighbor(Direction::SouthWest),
        }
    }
}
