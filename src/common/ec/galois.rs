// GF(256) arithmetic with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

const PRIMITIVE: u16 = 0x11D;

pub(crate) static EXP_TABLE: [u8; 256] = exp_table();

pub(crate) static LOG_TABLE: [u8; 256] = log_table();

const fn exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    table[255] = table[0];
    table
}

// LOG_TABLE[0] is undefined and left as 0
const fn log_table() -> [u8; 256] {
    let exp = exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

pub(crate) fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let log_sum = LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize;
    EXP_TABLE[log_sum % 255]
}

// Coefficients of prod(x - a^i) for i in 0..degree, highest degree first with
// the monic leading term omitted
pub(crate) fn generator_polynomial(degree: usize) -> Vec<u8> {
    debug_assert!((1..=255).contains(&degree), "Invalid generator degree: {degree}");

    let mut res = vec![0u8; degree];
    res[degree - 1] = 1;
    let mut root = 1u8;
    for _ in 0..degree {
        for j in 0..degree {
            res[j] = mul(res[j], root);
            if j + 1 < degree {
                res[j] ^= res[j + 1];
            }
        }
        root = mul(root, 0x02);
    }
    res
}
