use std::ops::Range;

// fixed length bit vector, bit i lives in bytes[i/8] at position i%8
// bits past `size` in the last byte are always zero, derived Eq/Hash rely on it
#[derive(Clone,Debug,Default,PartialEq,Eq,Hash)]
pub struct BitSet {
    size:usize,
    bytes:Vec<u8>
}

impl BitSet {
    pub fn new() -> Self {
        Self {size:0,bytes:vec![]}
    }
    pub fn with_capacity(capacity:usize) -> Self {
        if capacity == 0 {return Self::new()}
        let vec_capacity = capacity/8 + 1;
        Self {
            size:0,
            bytes:Vec::with_capacity(vec_capacity)
        }
    }
    // `len` bits, all cleared
    pub fn zeros(len:usize) -> Self {
        Self {
            size:len,
            bytes:vec![0;len.div_ceil(8)]
        }
    }
    pub fn len(&self) -> usize {
        self.size
    }
    pub fn push_bit(&mut self, bit:bool) {
        let byte_pos = self.size / 8;
        let pos_in_byte = self.size % 8;

        debug_assert!(byte_pos <= self.bytes.len());

        if let Some(byte) = self.bytes.get_mut(byte_pos) {
            let mask = 1u8 << pos_in_byte;
            if bit {
                *byte |= mask;
            }else{
                *byte &= !mask;
            }
        }else{
            self.bytes.push(bit as u8)
        }
        self.size += 1;
    }
    pub fn get_at(&self,index:usize) -> Option<bool> {
        if index >= self.size {return None}
        let byte_pos = index / 8;
        let pos_in_byte = index % 8;
        let byte = self.bytes.get(byte_pos)?;
        let mask = 1u8 << pos_in_byte;
        Some(*byte & mask > 0)
    }
    pub fn store_at(&mut self,index:usize,bit:bool) -> Option<()> {
        if index >= self.size {return None}
        let byte_pos = index / 8;
        let pos_in_byte = index % 8;
        let byte = self.bytes.get_mut(byte_pos)?;
        let mask = 1u8 << pos_in_byte;
        if bit {
            *byte |= mask;
        }else{
            *byte &= !mask;
        }
        Some(())
    }
    // sets every bit in [start,end), None if end is past the last bit
    pub fn set_range(&mut self,range:Range<usize>) -> Option<()> {
        if range.end > self.size {return None}
        for index in range {
            self.store_at(index, true)?;
        }
        Some(())
    }
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }
    pub fn any(&self) -> bool {
        self.bytes.iter().any(|b| *b != 0)
    }
    // true when no bit is set, a zero length set counts as well
    pub fn none(&self) -> bool {
        !self.any()
    }

    // the binary operations below never touch either operand,
    // None means the two sets have different lengths
    pub fn and(&self,rhs:&Self) -> Option<Self> {
        self.zip_with(rhs, |a,b| a & b)
    }
    pub fn or(&self,rhs:&Self) -> Option<Self> {
        self.zip_with(rhs, |a,b| a | b)
    }
    pub fn is_subset_of(&self,rhs:&Self) -> Option<bool> {
        if self.size != rhs.size {return None}
        Some(self.bytes.iter().zip(rhs.bytes.iter()).all(|(a,b)| a & !b == 0))
    }
    pub fn complement(&self) -> Self {
        let mut bytes:Vec<u8> = self.bytes.iter().map(|b| !b).collect();
        let tail = self.size % 8;
        if tail != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= (1u8 << tail) - 1;
            }
        }
        Self {size:self.size,bytes}
    }
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).filter(|index| self.get_at(*index) == Some(true))
    }
    // maximal runs of consecutive set bits, in ascending order
    pub fn runs(&self) -> Vec<Range<usize>> {
        let mut runs = vec![];
        let mut start:Option<usize> = None;
        for index in 0..self.size {
            match (self.get_at(index) == Some(true),start) {
                (true,None) => start = Some(index),
                (false,Some(s)) => {
                    runs.push(s..index);
                    start = None;
                },
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push(s..self.size);
        }
        runs
    }

    fn zip_with(&self,rhs:&Self,op:impl Fn(u8,u8) -> u8) -> Option<Self> {
        if self.size != rhs.size {return None}
        let bytes = self.bytes.iter().zip(rhs.bytes.iter()).map(|(a,b)| op(*a,*b)).collect();
        Some(Self {size:self.size,bytes})
    }
}

impl FromIterator<bool> for BitSet {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let size = match iter.size_hint() {
            (_,Some(higher)) => {higher},
            (lower,None) => {lower}
        };
        let mut set = Self::with_capacity(size);
        for bit in iter {
            set.push_bit(bit);
        }
        set
    }
}

#[cfg(test)]
mod tests{
    use rand::Rng;

    use super::BitSet;
    #[test]
    fn test_create() {
        BitSet::new();
        let mut set = BitSet::with_capacity(114514);
        for _ in 0..114514 {set.push_bit(true);}
        assert!(set.get_at(10000).unwrap());
        assert!(set.get_at(114513).unwrap());
        assert_eq!(set.count_ones(),114514);
        let bit = false;
        set.store_at(1145, bit).unwrap();
        assert_eq!(set.get_at(1145).unwrap(),bit);
        assert!(set.get_at(114514).is_none());
    }
    #[test]
    fn test_pushed_and_zeroed_sets_are_equal() {
        let pushed:BitSet = (0..13).map(|_| false).collect();
        assert_eq!(pushed,BitSet::zeros(13));
        assert!(pushed.none());
    }
    #[test]
    fn test_set_range() {
        let mut set = BitSet::zeros(20);
        set.set_range(3..7).unwrap();
        assert_eq!(set.ones().collect::<Vec<_>>(),vec![3,4,5,6]);
        assert!(set.set_range(15..21).is_none());
        assert_eq!(set.count_ones(),4);
    }
    #[test]
    fn test_binary_ops_leave_operands_alone() {
        let mut rng = rand::rng();
        let len:usize = rng.random_range(1..500);
        let a:BitSet = (0..len).map(|_| rng.random_bool(0.5)).collect();
        let b:BitSet = (0..len).map(|_| rng.random_bool(0.5)).collect();
        let (a_before,b_before) = (a.clone(),b.clone());

        let and = a.and(&b).unwrap();
        let or = a.or(&b).unwrap();
        for index in 0..len {
            let (x,y) = (a.get_at(index).unwrap(),b.get_at(index).unwrap());
            assert_eq!(and.get_at(index).unwrap(),x && y);
            assert_eq!(or.get_at(index).unwrap(),x || y);
        }
        assert!(and.is_subset_of(&a).unwrap());
        assert!(a.is_subset_of(&or).unwrap());
        assert_eq!(a,a_before);
        assert_eq!(b,b_before);
    }
    #[test]
    fn test_length_mismatch() {
        let a = BitSet::zeros(8);
        let b = BitSet::zeros(9);
        assert!(a.and(&b).is_none());
        assert!(a.is_subset_of(&b).is_none());
    }
    #[test]
    fn test_complement_keeps_tail_clear() {
        let mut set = BitSet::zeros(10);
        set.set_range(0..4).unwrap();
        let complement = set.complement();
        assert_eq!(complement.count_ones(),6);
        assert_eq!(complement.complement(),set);
    }
    #[test]
    fn test_runs() {
        let mut set = BitSet::zeros(16);
        set.set_range(0..2).unwrap();
        set.set_range(5..9).unwrap();
        set.set_range(15..16).unwrap();
        assert_eq!(set.runs(),vec![0..2,5..9,15..16]);
        assert!(BitSet::zeros(4).runs().is_empty());
    }
}
